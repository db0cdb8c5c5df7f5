//! delete action - Remove a bucket, optionally purging its contents
//!
//! Without `--force`, deleting a non-empty bucket fails with the service's
//! BucketNotEmpty error. With `--force`, all objects, versions, and delete
//! markers are removed first (first listing page only).

use serde::Serialize;

use crate::Cli;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

#[derive(Debug, Serialize)]
struct DeleteOutput {
    bucket: String,
    forced: bool,
    objects_removed: usize,
    versions_removed: usize,
    markers_removed: usize,
    failures: usize,
    bytes_reclaimed: u64,
}

pub async fn execute(cli: &Cli, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let bucket = match super::required_bucket_name(cli.bucket_name.as_deref(), "delete") {
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

    match orchestrator.delete(&bucket, cli.force).await {
        Ok(summary) => {
            if summary.failures > 0 {
                formatter.warning(&format!(
                    "{} cleanup call(s) failed while emptying '{bucket}'",
                    summary.failures
                ));
            }

            if formatter.is_json() {
                formatter.json(&DeleteOutput {
                    bucket: bucket.clone(),
                    forced: cli.force,
                    objects_removed: summary.objects_removed,
                    versions_removed: summary.versions_removed,
                    markers_removed: summary.markers_removed,
                    failures: summary.failures,
                    bytes_reclaimed: summary.bytes_reclaimed,
                });
            } else {
                if cli.force {
                    formatter.println(&format!(
                        "Removed {} object(s), {} version(s), {} delete marker(s) ({})",
                        summary.objects_removed,
                        summary.versions_removed,
                        summary.markers_removed,
                        humansize::format_size(summary.bytes_reclaimed, humansize::BINARY)
                    ));
                }
                formatter.success(&format!("Bucket '{}' deleted", formatter.style_name(&bucket)));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to delete bucket '{bucket}': {e}"));
            if e.is_not_found() {
                ExitCode::NotFound
            } else {
                ExitCode::GeneralError
            }
        }
    }
}
