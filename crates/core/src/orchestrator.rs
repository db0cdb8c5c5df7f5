//! Bucket orchestration sequences
//!
//! The two multi-step operations live here: the create sequence
//! (create, version, encrypt, lock down, optionally relax for public read)
//! and the forced teardown (purge all objects, versions, and delete markers
//! before requesting bucket deletion). The remaining operations are
//! single-call pass-throughs kept on the same type for a uniform surface.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::DEFAULT_REGION;
use crate::error::Result;
use crate::policy::public_read_policy;
use crate::store::BucketStore;
use crate::types::{BucketSummary, LifecycleSpec, PublicAccessFlags};

/// Outcome of the forced purge preceding bucket deletion
#[derive(Debug, Default, Clone, Serialize)]
pub struct PurgeSummary {
    pub objects_removed: usize,
    pub versions_removed: usize,
    pub markers_removed: usize,
    pub failures: usize,
    pub bytes_reclaimed: u64,
}

/// Drives bucket operations against a [`BucketStore`]
///
/// Stateless between operations; only the region captured at construction
/// influences behavior (the location-constraint decision on create).
pub struct BucketOrchestrator<S> {
    store: S,
    region: String,
}

impl<S: BucketStore> BucketOrchestrator<S> {
    pub fn new(store: S, region: impl Into<String>) -> Self {
        Self {
            store,
            region: region.into(),
        }
    }

    /// us-east-1 creation requests must not carry a location constraint;
    /// every other region must name itself explicitly.
    fn location_constraint(&self) -> Option<String> {
        (self.region != DEFAULT_REGION).then(|| self.region.clone())
    }

    /// Provision a bucket in a known-safe default state
    ///
    /// Best-effort: the first failing step aborts the remaining steps and
    /// surfaces the error. Steps already applied are left in place; there
    /// is no rollback.
    pub async fn create(&self, name: &str, public_read: bool) -> Result<()> {
        self.store
            .create_bucket(name, self.location_constraint())
            .await?;
        info!(bucket = name, region = %self.region, "bucket created");

        self.store.enable_versioning(name).await?;
        info!(bucket = name, "versioning enabled");

        self.store.apply_default_encryption(name).await?;
        info!(bucket = name, "default encryption applied");

        self.store
            .put_public_access_block(name, PublicAccessFlags::BLOCK_ALL)
            .await?;
        info!(bucket = name, "public access blocked");

        if public_read {
            self.store
                .put_public_access_block(name, PublicAccessFlags::ALLOW_ALL)
                .await?;
            self.store
                .put_bucket_policy(name, &public_read_policy(name))
                .await?;
            info!(bucket = name, "public read policy attached");
        }

        Ok(())
    }

    /// Delete a bucket, optionally purging its contents first
    ///
    /// With `force`, every listed object, version, and delete marker is
    /// removed before the bucket-deletion call. Individual cleanup failures
    /// are counted but never stop the sequence; the final deletion call's
    /// result decides the overall outcome.
    pub async fn delete(&self, name: &str, force: bool) -> Result<PurgeSummary> {
        let mut summary = PurgeSummary::default();

        if force {
            self.purge(name, &mut summary).await;
        }

        self.store.delete_bucket(name).await?;
        info!(bucket = name, "bucket deleted");

        Ok(summary)
    }

    /// Empty a bucket: current objects first, then every version and
    /// delete marker by id.
    ///
    /// Only the first page of each listing is read. Buckets larger than one
    /// page keep their remainder and the subsequent deletion call fails
    /// with BucketNotEmpty.
    async fn purge(&self, name: &str, summary: &mut PurgeSummary) {
        match self.store.list_objects(name).await {
            Ok(objects) => {
                for obj in objects {
                    match self.store.delete_object(name, &obj.key).await {
                        Ok(()) => {
                            summary.objects_removed += 1;
                            summary.bytes_reclaimed += obj.size.max(0) as u64;
                        }
                        Err(e) => {
                            warn!(bucket = name, key = %obj.key, error = %e, "object deletion failed");
                            summary.failures += 1;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(bucket = name, error = %e, "object listing failed");
                summary.failures += 1;
            }
        }

        match self.store.list_object_versions(name).await {
            Ok(versions) => {
                for v in versions {
                    match self
                        .store
                        .delete_object_version(name, &v.key, &v.version_id)
                        .await
                    {
                        Ok(()) => {
                            if v.is_delete_marker {
                                summary.markers_removed += 1;
                            } else {
                                summary.versions_removed += 1;
                            }
                        }
                        Err(e) => {
                            warn!(
                                bucket = name,
                                key = %v.key,
                                version_id = %v.version_id,
                                error = %e,
                                "version deletion failed"
                            );
                            summary.failures += 1;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(bucket = name, error = %e, "version listing failed");
                summary.failures += 1;
            }
        }
    }

    /// Enumerate all buckets visible to the configured credentials
    pub async fn list(&self) -> Result<Vec<BucketSummary>> {
        self.store.list_buckets().await
    }

    /// Replace the bucket's lifecycle rule set with a single rule
    pub async fn set_lifecycle(&self, name: &str, spec: LifecycleSpec) -> Result<()> {
        self.store.put_lifecycle(name, &spec).await?;
        info!(
            bucket = name,
            transition_days = spec.transition_days,
            expire_days = spec.expire_days,
            "lifecycle policy set"
        );
        Ok(())
    }

    /// Enable server access logging, delivering logs to
    /// `{log_prefix}{name}/` in `log_bucket`
    pub async fn enable_logging(&self, name: &str, log_bucket: &str, log_prefix: &str) -> Result<()> {
        let target_prefix = format!("{log_prefix}{name}/");
        self.store
            .put_logging(name, log_bucket, &target_prefix)
            .await?;
        info!(
            bucket = name,
            target_bucket = log_bucket,
            target_prefix = %target_prefix,
            "access logging enabled"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::MockBucketStore;
    use crate::types::{ObjectEntry, VersionEntry};
    use mockall::Sequence;

    fn service_err(operation: &'static str) -> Error {
        Error::service(operation, "test-bucket", "simulated failure")
    }

    #[tokio::test]
    async fn test_create_omits_location_constraint_for_default_region() {
        let mut store = MockBucketStore::new();
        store
            .expect_create_bucket()
            .withf(|name, constraint| name == "media" && constraint.is_none())
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_enable_versioning().returning(|_| Ok(()));
        store.expect_apply_default_encryption().returning(|_| Ok(()));
        store.expect_put_public_access_block().returning(|_, _| Ok(()));

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        orchestrator.create("media", false).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_includes_location_constraint_for_other_regions() {
        let mut store = MockBucketStore::new();
        store
            .expect_create_bucket()
            .withf(|name, constraint| {
                name == "media" && constraint.as_deref() == Some("eu-central-1")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_enable_versioning().returning(|_| Ok(()));
        store.expect_apply_default_encryption().returning(|_| Ok(()));
        store.expect_put_public_access_block().returning(|_, _| Ok(()));

        let orchestrator = BucketOrchestrator::new(store, "eu-central-1");
        orchestrator.create("media", false).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_private_sequence_attaches_no_policy() {
        let mut seq = Sequence::new();
        let mut store = MockBucketStore::new();

        store
            .expect_create_bucket()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_enable_versioning()
            .withf(|name| name == "media")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_apply_default_encryption()
            .withf(|name| name == "media")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_put_public_access_block()
            .withf(|name, flags| name == "media" && flags.is_fully_blocked())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store.expect_put_bucket_policy().never();

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        orchestrator.create("media", false).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_public_read_relaxes_block_then_attaches_policy() {
        let mut seq = Sequence::new();
        let mut store = MockBucketStore::new();

        store
            .expect_create_bucket()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_enable_versioning()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_apply_default_encryption()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_put_public_access_block()
            .withf(|_, flags| flags.is_fully_blocked())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_put_public_access_block()
            .withf(|_, flags| *flags == PublicAccessFlags::ALLOW_ALL)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_put_bucket_policy()
            .withf(|name, policy| {
                let doc: serde_json::Value = serde_json::from_str(policy).unwrap();
                name == "media"
                    && doc["Statement"][0]["Action"] == "s3:GetObject"
                    && doc["Statement"][0]["Principal"] == "*"
                    && doc["Statement"][0]["Resource"] == "arn:aws:s3:::media/*"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        orchestrator.create("media", true).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_aborts_on_step_failure_without_rollback() {
        let mut store = MockBucketStore::new();
        store.expect_create_bucket().times(1).returning(|_, _| Ok(()));
        store
            .expect_enable_versioning()
            .times(1)
            .returning(|_| Err(service_err("PutBucketVersioning")));
        // Later steps must never run, and nothing compensates the creation.
        store.expect_apply_default_encryption().never();
        store.expect_put_public_access_block().never();
        store.expect_put_bucket_policy().never();
        store.expect_delete_bucket().never();

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        let err = orchestrator.create("media", true).await.unwrap_err();
        assert!(err.to_string().contains("PutBucketVersioning"));
    }

    #[tokio::test]
    async fn test_delete_without_force_skips_enumeration() {
        let mut store = MockBucketStore::new();
        store.expect_list_objects().never();
        store.expect_list_object_versions().never();
        store.expect_delete_object().never();
        store.expect_delete_object_version().never();
        store
            .expect_delete_bucket()
            .withf(|name| name == "media")
            .times(1)
            .returning(|_| Err(service_err("DeleteBucket")));

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        assert!(orchestrator.delete("media", false).await.is_err());
    }

    #[tokio::test]
    async fn test_force_delete_purges_before_bucket_deletion() {
        let mut seq = Sequence::new();
        let mut store = MockBucketStore::new();

        store
            .expect_list_objects()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(vec![
                    ObjectEntry {
                        key: "a.txt".to_string(),
                        size: 100,
                    },
                    ObjectEntry {
                        key: "b.txt".to_string(),
                        size: 200,
                    },
                ])
            });
        store
            .expect_delete_object()
            .withf(|_, key| key == "a.txt")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_delete_object()
            .withf(|_, key| key == "b.txt")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_list_object_versions()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(vec![
                    VersionEntry {
                        key: "a.txt".to_string(),
                        version_id: "v1".to_string(),
                        is_delete_marker: false,
                    },
                    VersionEntry {
                        key: "a.txt".to_string(),
                        version_id: "v2".to_string(),
                        is_delete_marker: true,
                    },
                ])
            });
        store
            .expect_delete_object_version()
            .withf(|_, key, version_id| key == "a.txt" && version_id == "v1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        store
            .expect_delete_object_version()
            .withf(|_, key, version_id| key == "a.txt" && version_id == "v2")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        store
            .expect_delete_bucket()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        let summary = orchestrator.delete("media", true).await.unwrap();
        assert_eq!(summary.objects_removed, 2);
        assert_eq!(summary.versions_removed, 1);
        assert_eq!(summary.markers_removed, 1);
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.bytes_reclaimed, 300);
    }

    #[tokio::test]
    async fn test_force_delete_continues_past_cleanup_failures() {
        let mut store = MockBucketStore::new();

        store.expect_list_objects().times(1).returning(|_| {
            Ok(vec![
                ObjectEntry {
                    key: "a.txt".to_string(),
                    size: 100,
                },
                ObjectEntry {
                    key: "b.txt".to_string(),
                    size: 200,
                },
            ])
        });
        store
            .expect_delete_object()
            .withf(|_, key| key == "a.txt")
            .times(1)
            .returning(|_, _| Err(service_err("DeleteObject")));
        store
            .expect_delete_object()
            .withf(|_, key| key == "b.txt")
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_list_object_versions()
            .times(1)
            .returning(|_| Ok(vec![]));
        store.expect_delete_bucket().times(1).returning(|_| Ok(()));

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        let summary = orchestrator.delete("media", true).await.unwrap();
        assert_eq!(summary.objects_removed, 1);
        assert_eq!(summary.failures, 1);
    }

    #[tokio::test]
    async fn test_force_delete_listing_failure_still_attempts_deletion() {
        let mut store = MockBucketStore::new();
        store
            .expect_list_objects()
            .times(1)
            .returning(|_| Err(service_err("ListObjectsV2")));
        store
            .expect_list_object_versions()
            .times(1)
            .returning(|_| Err(service_err("ListObjectVersions")));
        store.expect_delete_bucket().times(1).returning(|_| Ok(()));

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        let summary = orchestrator.delete("media", true).await.unwrap();
        assert_eq!(summary.failures, 2);
    }

    #[tokio::test]
    async fn test_set_lifecycle_passes_spec_through() {
        let mut store = MockBucketStore::new();
        store
            .expect_put_lifecycle()
            .withf(|name, spec| {
                name == "media" && spec.transition_days == 30 && spec.expire_days == 365
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        orchestrator
            .set_lifecycle(
                "media",
                LifecycleSpec {
                    transition_days: 30,
                    expire_days: 365,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_enable_logging_composes_target_prefix() {
        let mut store = MockBucketStore::new();
        store
            .expect_put_logging()
            .withf(|name, target_bucket, target_prefix| {
                name == "media" && target_bucket == "logs" && target_prefix == "archive/media/"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        orchestrator
            .enable_logging("media", "logs", "archive/")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_passes_through() {
        let mut store = MockBucketStore::new();
        store.expect_list_buckets().times(1).returning(|| {
            Ok(vec![BucketSummary {
                name: "media".to_string(),
                created: None,
            }])
        });

        let orchestrator = BucketOrchestrator::new(store, "us-east-1");
        let buckets = orchestrator.list().await.unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].name, "media");
    }
}
