//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the BucketStore trait from ba-core.
//! Credentials come from the default provider chain; the region (and an
//! optional custom endpoint) are taken from the per-process ClientConfig.

use async_trait::async_trait;

use ba_core::{
    BucketStore, BucketSummary, ClientConfig, Error, LIFECYCLE_RULE_ID, LifecycleSpec,
    ObjectEntry, PublicAccessFlags, Result, VersionEntry,
};

use aws_sdk_s3::types::{
    BucketLifecycleConfiguration, BucketLocationConstraint, BucketLoggingStatus,
    BucketVersioningStatus, CreateBucketConfiguration, ExpirationStatus, LifecycleExpiration,
    LifecycleRule, LifecycleRuleFilter, LoggingEnabled, PublicAccessBlockConfiguration,
    ServerSideEncryption, ServerSideEncryptionByDefault, ServerSideEncryptionConfiguration,
    ServerSideEncryptionRule, Transition, TransitionStorageClass, VersioningConfiguration,
};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from the process configuration
    pub async fn new(config: &ClientConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        tracing::debug!(
            region = %config.region,
            endpoint = ?config.endpoint_url,
            path_style = config.force_path_style,
            "S3 client initialized"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Format AWS SDK error into a detailed error message
    fn format_sdk_error<E: std::fmt::Display>(error: &aws_sdk_s3::error::SdkError<E>) -> String {
        match error {
            aws_sdk_s3::error::SdkError::ServiceError(service_err) => {
                let err = service_err.err();
                let meta = service_err.raw();
                let mut msg = format!("Service error: {}", err);
                // Try to extract additional error information from headers
                if let Some(code) = meta.headers().get("x-amz-error-code")
                    && let Ok(code_str) = std::str::from_utf8(code.as_bytes())
                {
                    msg.push_str(&format!(" (code: {})", code_str));
                }
                msg
            }
            aws_sdk_s3::error::SdkError::ConstructionFailure(err) => {
                format!("Request construction failed: {:?}", err)
            }
            aws_sdk_s3::error::SdkError::TimeoutError(_) => "Request timeout".to_string(),
            aws_sdk_s3::error::SdkError::DispatchFailure(err) => {
                format!("Network dispatch error: {:?}", err)
            }
            aws_sdk_s3::error::SdkError::ResponseError(err) => {
                format!("Response error: {:?}", err)
            }
            _ => error.to_string(),
        }
    }
}

/// Build the public-access-block configuration from the core flags
fn public_access_block_config(flags: PublicAccessFlags) -> PublicAccessBlockConfiguration {
    PublicAccessBlockConfiguration::builder()
        .block_public_acls(flags.block_public_acls)
        .ignore_public_acls(flags.ignore_public_acls)
        .block_public_policy(flags.block_public_policy)
        .restrict_public_buckets(flags.restrict_public_buckets)
        .build()
}

/// Build the single-rule lifecycle configuration for a bucket
///
/// The rule transitions all objects (empty prefix filter) to Standard-IA
/// and expires them after the configured number of days.
fn lifecycle_config(
    spec: &LifecycleSpec,
) -> std::result::Result<BucketLifecycleConfiguration, aws_sdk_s3::error::BuildError> {
    let rule = LifecycleRule::builder()
        .id(LIFECYCLE_RULE_ID)
        .status(ExpirationStatus::Enabled)
        .filter(LifecycleRuleFilter::builder().prefix("").build())
        .transitions(
            Transition::builder()
                .days(spec.transition_days)
                .storage_class(TransitionStorageClass::StandardIa)
                .build(),
        )
        .expiration(LifecycleExpiration::builder().days(spec.expire_days).build())
        .build()?;

    BucketLifecycleConfiguration::builder().rules(rule).build()
}

/// Build the AES-256 default-encryption configuration with the bucket-key
/// optimization enabled
fn encryption_config()
-> std::result::Result<ServerSideEncryptionConfiguration, aws_sdk_s3::error::BuildError> {
    let by_default = ServerSideEncryptionByDefault::builder()
        .sse_algorithm(ServerSideEncryption::Aes256)
        .build()?;

    let rule = ServerSideEncryptionRule::builder()
        .apply_server_side_encryption_by_default(by_default)
        .bucket_key_enabled(true)
        .build();

    ServerSideEncryptionConfiguration::builder().rules(rule).build()
}

#[async_trait]
impl BucketStore for S3Client {
    async fn create_bucket(&self, name: &str, location_constraint: Option<String>) -> Result<()> {
        let mut request = self.inner.create_bucket().bucket(name);

        if let Some(region) = location_constraint {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_str()))
                    .build(),
            );
        }

        request
            .send()
            .await
            .map_err(|e| Error::service("CreateBucket", name, Self::format_sdk_error(&e)))?;

        Ok(())
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        self.inner
            .delete_bucket()
            .bucket(name)
            .send()
            .await
            .map_err(|e| Error::service("DeleteBucket", name, Self::format_sdk_error(&e)))?;

        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<BucketSummary>> {
        // Unpaginated; sufficient for reasonable account sizes.
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| Error::service("ListBuckets", "account", Self::format_sdk_error(&e)))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| BucketSummary {
                name: b.name().unwrap_or_default().to_string(),
                created: b
                    .creation_date()
                    .and_then(|dt| jiff::Timestamp::from_second(dt.secs()).ok()),
            })
            .collect();

        Ok(buckets)
    }

    async fn enable_versioning(&self, name: &str) -> Result<()> {
        let config = VersioningConfiguration::builder()
            .status(BucketVersioningStatus::Enabled)
            .build();

        self.inner
            .put_bucket_versioning()
            .bucket(name)
            .versioning_configuration(config)
            .send()
            .await
            .map_err(|e| Error::service("PutBucketVersioning", name, Self::format_sdk_error(&e)))?;

        Ok(())
    }

    async fn apply_default_encryption(&self, name: &str) -> Result<()> {
        let config = encryption_config()
            .map_err(|e| Error::service("PutBucketEncryption", name, e.to_string()))?;

        self.inner
            .put_bucket_encryption()
            .bucket(name)
            .server_side_encryption_configuration(config)
            .send()
            .await
            .map_err(|e| Error::service("PutBucketEncryption", name, Self::format_sdk_error(&e)))?;

        Ok(())
    }

    async fn put_public_access_block(&self, name: &str, flags: PublicAccessFlags) -> Result<()> {
        self.inner
            .put_public_access_block()
            .bucket(name)
            .public_access_block_configuration(public_access_block_config(flags))
            .send()
            .await
            .map_err(|e| {
                Error::service("PutPublicAccessBlock", name, Self::format_sdk_error(&e))
            })?;

        Ok(())
    }

    async fn put_bucket_policy(&self, name: &str, policy: &str) -> Result<()> {
        self.inner
            .put_bucket_policy()
            .bucket(name)
            .policy(policy)
            .send()
            .await
            .map_err(|e| Error::service("PutBucketPolicy", name, Self::format_sdk_error(&e)))?;

        Ok(())
    }

    async fn put_lifecycle(&self, name: &str, spec: &LifecycleSpec) -> Result<()> {
        let config = lifecycle_config(spec).map_err(|e| {
            Error::service("PutBucketLifecycleConfiguration", name, e.to_string())
        })?;

        self.inner
            .put_bucket_lifecycle_configuration()
            .bucket(name)
            .lifecycle_configuration(config)
            .send()
            .await
            .map_err(|e| {
                Error::service(
                    "PutBucketLifecycleConfiguration",
                    name,
                    Self::format_sdk_error(&e),
                )
            })?;

        Ok(())
    }

    async fn put_logging(
        &self,
        name: &str,
        target_bucket: &str,
        target_prefix: &str,
    ) -> Result<()> {
        let enabled = LoggingEnabled::builder()
            .target_bucket(target_bucket)
            .target_prefix(target_prefix)
            .build()
            .map_err(|e| Error::service("PutBucketLogging", name, e.to_string()))?;

        let status = BucketLoggingStatus::builder().logging_enabled(enabled).build();

        self.inner
            .put_bucket_logging()
            .bucket(name)
            .bucket_logging_status(status)
            .send()
            .await
            .map_err(|e| Error::service("PutBucketLogging", name, Self::format_sdk_error(&e)))?;

        Ok(())
    }

    async fn list_objects(&self, name: &str) -> Result<Vec<ObjectEntry>> {
        // First page only; the purge sequence in ba-core documents this.
        let response = self
            .inner
            .list_objects_v2()
            .bucket(name)
            .send()
            .await
            .map_err(|e| Error::service("ListObjectsV2", name, Self::format_sdk_error(&e)))?;

        let objects = response
            .contents()
            .iter()
            .map(|o| ObjectEntry {
                key: o.key().unwrap_or_default().to_string(),
                size: o.size().unwrap_or(0),
            })
            .collect();

        Ok(objects)
    }

    async fn delete_object(&self, name: &str, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(name)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::service("DeleteObject", name, Self::format_sdk_error(&e)))?;

        Ok(())
    }

    async fn list_object_versions(&self, name: &str) -> Result<Vec<VersionEntry>> {
        // First page only, versions and delete markers together.
        let response = self
            .inner
            .list_object_versions()
            .bucket(name)
            .send()
            .await
            .map_err(|e| {
                Error::service("ListObjectVersions", name, Self::format_sdk_error(&e))
            })?;

        let mut entries = Vec::new();

        for v in response.versions() {
            entries.push(VersionEntry {
                key: v.key().unwrap_or_default().to_string(),
                version_id: v.version_id().unwrap_or("null").to_string(),
                is_delete_marker: false,
            });
        }

        for m in response.delete_markers() {
            entries.push(VersionEntry {
                key: m.key().unwrap_or_default().to_string(),
                version_id: m.version_id().unwrap_or("null").to_string(),
                is_delete_marker: true,
            });
        }

        Ok(entries)
    }

    async fn delete_object_version(&self, name: &str, key: &str, version_id: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(name)
            .key(key)
            .version_id(version_id)
            .send()
            .await
            .map_err(|e| Error::service("DeleteObject", name, Self::format_sdk_error(&e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_access_block_config_maps_all_flags() {
        let config = public_access_block_config(PublicAccessFlags::BLOCK_ALL);
        assert_eq!(config.block_public_acls(), Some(true));
        assert_eq!(config.ignore_public_acls(), Some(true));
        assert_eq!(config.block_public_policy(), Some(true));
        assert_eq!(config.restrict_public_buckets(), Some(true));

        let config = public_access_block_config(PublicAccessFlags::ALLOW_ALL);
        assert_eq!(config.block_public_acls(), Some(false));
        assert_eq!(config.restrict_public_buckets(), Some(false));
    }

    #[test]
    fn test_lifecycle_config_single_rule() {
        let config = lifecycle_config(&LifecycleSpec {
            transition_days: 30,
            expire_days: 365,
        })
        .unwrap();

        let rules = config.rules();
        assert_eq!(rules.len(), 1);

        let rule = &rules[0];
        assert_eq!(rule.id(), Some(LIFECYCLE_RULE_ID));
        assert_eq!(rule.status(), &ExpirationStatus::Enabled);
        assert_eq!(rule.transitions().len(), 1);
        assert_eq!(rule.transitions()[0].days(), Some(30));
        assert_eq!(
            rule.transitions()[0].storage_class(),
            Some(&TransitionStorageClass::StandardIa)
        );
        assert_eq!(rule.expiration().and_then(|e| e.days()), Some(365));
    }

    #[test]
    fn test_encryption_config_aes256_with_bucket_key() {
        let config = encryption_config().unwrap();

        let rules = config.rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].bucket_key_enabled(), Some(true));
        assert_eq!(
            rules[0]
                .apply_server_side_encryption_by_default()
                .map(|d| d.sse_algorithm()),
            Some(&ServerSideEncryption::Aes256)
        );
    }
}
