//! The `BucketStore` trait abstracting the remote object store
//!
//! One async method per remote call the orchestrator issues. Implemented by
//! the aws-sdk-s3 adapter in `ba-s3`; mocked in orchestrator tests.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::error::Result;
use crate::types::{BucketSummary, LifecycleSpec, ObjectEntry, PublicAccessFlags, VersionEntry};

/// Interface to the remote object store
///
/// Every method is a single blocking request/response against the service.
/// Retries, timeouts, and authentication are the client's concern, not ours.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Create a bucket, with an explicit location constraint when required
    /// by the target region
    async fn create_bucket(&self, name: &str, location_constraint: Option<String>) -> Result<()>;

    /// Delete a bucket; the service rejects this for non-empty buckets
    async fn delete_bucket(&self, name: &str) -> Result<()>;

    /// List all buckets visible to the configured credentials (unpaginated)
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>>;

    /// Enable object versioning on a bucket
    async fn enable_versioning(&self, name: &str) -> Result<()>;

    /// Apply default server-side encryption (AES-256, bucket key enabled)
    async fn apply_default_encryption(&self, name: &str) -> Result<()>;

    /// Replace the bucket's public-access-block configuration
    async fn put_public_access_block(&self, name: &str, flags: PublicAccessFlags) -> Result<()>;

    /// Attach a policy document to a bucket
    async fn put_bucket_policy(&self, name: &str, policy: &str) -> Result<()>;

    /// Replace the bucket's lifecycle rule set with a single rule
    async fn put_lifecycle(&self, name: &str, spec: &LifecycleSpec) -> Result<()>;

    /// Configure server access logging to `target_bucket` / `target_prefix`
    async fn put_logging(&self, name: &str, target_bucket: &str, target_prefix: &str)
    -> Result<()>;

    /// List current objects in a bucket (first page only)
    async fn list_objects(&self, name: &str) -> Result<Vec<ObjectEntry>>;

    /// Delete a single object by key
    async fn delete_object(&self, name: &str, key: &str) -> Result<()>;

    /// List object versions and delete markers (first page only)
    async fn list_object_versions(&self, name: &str) -> Result<Vec<VersionEntry>>;

    /// Delete a specific object version or delete marker by id
    async fn delete_object_version(&self, name: &str, key: &str, version_id: &str) -> Result<()>;
}
