//! ba-s3: aws-sdk-s3 adapter for the bucket-admin CLI
//!
//! Implements the `BucketStore` trait from ba-core on top of the AWS SDK.

pub mod client;

pub use client::S3Client;
