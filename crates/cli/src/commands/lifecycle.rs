//! lifecycle action - Replace a bucket's lifecycle rule set
//!
//! Installs a single rule: transition to Standard-IA after
//! `--transition-days`, expire after `--expire-days`. The service's own
//! validation of the two values is authoritative.

use serde::Serialize;

use ba_core::{LIFECYCLE_RULE_ID, LifecycleSpec};

use crate::Cli;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

#[derive(Debug, Serialize)]
struct LifecycleOutput {
    bucket: String,
    rule_id: String,
    storage_class: String,
    transition_days: i32,
    expire_days: i32,
}

pub async fn execute(cli: &Cli, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let bucket = match super::required_bucket_name(cli.bucket_name.as_deref(), "lifecycle") {
        Ok(b) => b,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    if cli.transition_days >= cli.expire_days {
        formatter.warning(&format!(
            "--transition-days ({}) is not below --expire-days ({}); the service may reject this rule",
            cli.transition_days, cli.expire_days
        ));
    }

    let orchestrator = match super::setup_orchestrator(cli, &formatter).await {
        Ok(o) => o,
        Err(code) => return code,
    };

    let spec = LifecycleSpec {
        transition_days: cli.transition_days,
        expire_days: cli.expire_days,
    };

    match orchestrator.set_lifecycle(&bucket, spec).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&LifecycleOutput {
                    bucket: bucket.clone(),
                    rule_id: LIFECYCLE_RULE_ID.to_string(),
                    storage_class: "STANDARD_IA".to_string(),
                    transition_days: spec.transition_days,
                    expire_days: spec.expire_days,
                });
            } else {
                formatter.success(&format!(
                    "Lifecycle policy set for '{}': Standard-IA after {} day(s), expire after {} day(s)",
                    formatter.style_name(&bucket),
                    spec.transition_days,
                    spec.expire_days
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to set lifecycle policy for '{bucket}': {e}"));
            ExitCode::GeneralError
        }
    }
}
