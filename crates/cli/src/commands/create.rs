//! create action - Provision a bucket in a known-safe default state
//!
//! Runs the full creation sequence: create, versioning, default encryption,
//! public-access block, and optionally the public-read relaxation.

use serde::Serialize;

use crate::Cli;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

#[derive(Debug, Serialize)]
struct CreateOutput {
    bucket: String,
    region: String,
    versioning: bool,
    encryption: String,
    public_read: bool,
}

pub async fn execute(cli: &Cli, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let bucket = match super::required_bucket_name(cli.bucket_name.as_deref(), "create") {
        Ok(b) => b,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let orchestrator = match super::setup_orchestrator(cli, &formatter).await {
        Ok(o) => o,
        Err(code) => return code,
    };

    match orchestrator.create(&bucket, cli.public_read).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&CreateOutput {
                    bucket: bucket.clone(),
                    region: cli.region.clone(),
                    versioning: true,
                    encryption: "AES256".to_string(),
                    public_read: cli.public_read,
                });
            } else {
                formatter.success(&format!(
                    "Bucket '{}' created in {}",
                    formatter.style_name(&bucket),
                    cli.region
                ));
                formatter.println("Versioning enabled, AES-256 encryption applied");
                if cli.public_read {
                    formatter.println(&format!("Public read policy applied to '{bucket}'"));
                } else {
                    formatter.println("Public access blocked");
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to create bucket '{bucket}': {e}"));
            ExitCode::GeneralError
        }
    }
}
