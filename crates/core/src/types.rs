//! Data types shared between the orchestrator and the store adapter
//!
//! All of these describe remote-service resources; no state is persisted
//! locally.

use jiff::Timestamp;
use serde::Serialize;

/// Rule id used when replacing a bucket's lifecycle configuration
pub const LIFECYCLE_RULE_ID: &str = "StandardLifecycleRule";

/// A bucket as reported by the bucket listing call
#[derive(Debug, Clone, Serialize)]
pub struct BucketSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

/// A current object as reported by the object listing call
#[derive(Debug, Clone)]
pub struct ObjectEntry {
    pub key: String,
    pub size: i64,
}

/// An object version or delete marker from the version listing call
#[derive(Debug, Clone)]
pub struct VersionEntry {
    pub key: String,
    pub version_id: String,
    pub is_delete_marker: bool,
}

/// The four public-access-block restriction flags
///
/// When all four are true, any public bucket policy is inert; when any is
/// false, a public policy becomes effective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublicAccessFlags {
    pub block_public_acls: bool,
    pub ignore_public_acls: bool,
    pub block_public_policy: bool,
    pub restrict_public_buckets: bool,
}

impl PublicAccessFlags {
    /// Safe default applied to every new bucket
    pub const BLOCK_ALL: Self = Self {
        block_public_acls: true,
        ignore_public_acls: true,
        block_public_policy: true,
        restrict_public_buckets: true,
    };

    /// Applied before attaching a public-read policy
    pub const ALLOW_ALL: Self = Self {
        block_public_acls: false,
        ignore_public_acls: false,
        block_public_policy: false,
        restrict_public_buckets: false,
    };

    pub fn is_fully_blocked(&self) -> bool {
        self.block_public_acls
            && self.ignore_public_acls
            && self.block_public_policy
            && self.restrict_public_buckets
    }
}

/// The single lifecycle rule applied to a bucket
///
/// Transitions all objects to an infrequent-access storage class after
/// `transition_days`, expires them after `expire_days`. The remote service
/// validates the relationship between the two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifecycleSpec {
    pub transition_days: i32,
    pub expire_days: i32,
}
