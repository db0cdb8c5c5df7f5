//! ba-core: Core library for the bucket-admin CLI
//!
//! This crate provides the core functionality for the `ba` CLI, including:
//! - Client configuration
//! - Error taxonomy for remote service failures
//! - The `BucketStore` trait abstracting the object-storage client
//! - The `BucketOrchestrator` driving multi-step bucket operations
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the orchestration sequences to be tested against a mock store.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod policy;
pub mod store;
pub mod types;

pub use config::{ClientConfig, DEFAULT_REGION};
pub use error::{Error, Result};
pub use orchestrator::{BucketOrchestrator, PurgeSummary};
pub use policy::public_read_policy;
pub use store::BucketStore;
pub use types::{
    BucketSummary, LIFECYCLE_RULE_ID, LifecycleSpec, ObjectEntry, PublicAccessFlags, VersionEntry,
};
