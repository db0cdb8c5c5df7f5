//! logging action - Enable server access logging for a bucket
//!
//! Log objects are delivered to `--log-bucket` under
//! `{--log-prefix}{bucket}/`. The target bucket's existence and write
//! permissions are validated by the service, not here.

use serde::Serialize;

use crate::Cli;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

#[derive(Debug, Serialize)]
struct LoggingOutput {
    bucket: String,
    target_bucket: String,
    target_prefix: String,
}

pub async fn execute(cli: &Cli, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let bucket = match super::required_bucket_name(cli.bucket_name.as_deref(), "logging") {
        Ok(b) => b,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let log_bucket = match super::required_log_bucket(cli.log_bucket.as_deref()) {
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

    match orchestrator
        .enable_logging(&bucket, &log_bucket, &cli.log_prefix)
        .await
    {
        Ok(()) => {
            let target_prefix = format!("{}{}/", cli.log_prefix, bucket);
            if formatter.is_json() {
                formatter.json(&LoggingOutput {
                    bucket: bucket.clone(),
                    target_bucket: log_bucket.clone(),
                    target_prefix,
                });
            } else {
                formatter.success(&format!(
                    "Access logging enabled for '{}' -> '{log_bucket}/{target_prefix}'",
                    formatter.style_name(&bucket)
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to enable logging for '{bucket}': {e}"));
            ExitCode::GeneralError
        }
    }
}
