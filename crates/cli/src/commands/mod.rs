//! Action dispatch and shared command plumbing
//!
//! Required-flag validation happens here, before any client is constructed,
//! so an input error never issues a remote call.

mod create;
mod delete;
mod lifecycle;
mod list;
mod logging;

use ba_core::{BucketOrchestrator, ClientConfig, Error};
use ba_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};
use crate::{Action, Cli};

/// Run the selected action to completion
pub async fn dispatch(cli: Cli, output_config: OutputConfig) -> ExitCode {
    match cli.action {
        Action::Create => create::execute(&cli, output_config).await,
        Action::Delete => delete::execute(&cli, output_config).await,
        Action::List => list::execute(&cli, output_config).await,
        Action::Lifecycle => lifecycle::execute(&cli, output_config).await,
        Action::Logging => logging::execute(&cli, output_config).await,
    }
}

/// Build the S3 client and orchestrator from the CLI flags
///
/// Called only after the action's required flags have been validated.
async fn setup_orchestrator(
    cli: &Cli,
    formatter: &Formatter,
) -> Result<BucketOrchestrator<S3Client>, ExitCode> {
    let config = ClientConfig {
        region: cli.region.clone(),
        endpoint_url: cli.endpoint_url.clone(),
        force_path_style: cli.endpoint_url.is_some(),
    };

    let client = match S3Client::new(&config).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return Err(ExitCode::NetworkError);
        }
    };

    Ok(BucketOrchestrator::new(client, cli.region.clone()))
}

/// Resolve the bucket name required by an action
fn required_bucket_name(bucket_name: Option<&str>, action: &str) -> ba_core::Result<String> {
    match bucket_name {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(Error::InvalidInput(format!(
            "--bucket-name is required for {action} action"
        ))),
    }
}

/// Resolve the log bucket required by the logging action
fn required_log_bucket(log_bucket: Option<&str>) -> ba_core::Result<String> {
    match log_bucket {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(Error::InvalidInput(
            "--log-bucket is required for logging action".to_string(),
        )),
    }
}
