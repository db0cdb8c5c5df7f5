//! ba: S3 bucket administration CLI
//!
//! A flag-driven dispatcher over the bucket orchestrator: one action per
//! invocation, strictly sequential remote calls, no state between runs.

mod commands;
mod exit_code;
mod output;

use clap::{Parser, ValueEnum};

use crate::output::OutputConfig;

/// S3 bucket administration for the social platform
#[derive(Parser, Debug)]
#[command(name = "ba", version, about)]
pub struct Cli {
    /// AWS region
    #[arg(long, env = "BA_REGION", default_value = ba_core::DEFAULT_REGION)]
    pub region: String,

    /// Operation to perform
    #[arg(long, value_enum)]
    pub action: Action,

    /// Name of the bucket
    #[arg(long)]
    pub bucket_name: Option<String>,

    /// Enable public read access (create only)
    #[arg(long)]
    pub public_read: bool,

    /// Target bucket for access logs (logging only)
    #[arg(long)]
    pub log_bucket: Option<String>,

    /// Prefix for delivered log objects (logging only)
    #[arg(long, default_value = "logs/")]
    pub log_prefix: String,

    /// Days until objects transition to Standard-IA (lifecycle only)
    #[arg(long, default_value_t = 30)]
    pub transition_days: i32,

    /// Days until objects expire (lifecycle only)
    #[arg(long, default_value_t = 365)]
    pub expire_days: i32,

    /// Empty the bucket (all objects, versions, and delete markers)
    /// before deletion (delete only)
    #[arg(long)]
    pub force: bool,

    /// Custom S3 endpoint for S3-compatible stores (implies path-style)
    #[arg(long, env = "BA_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// The administrative operation selected with `--action`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Create,
    Delete,
    List,
    Lifecycle,
    Logging,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_config = OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    let code = commands::dispatch(cli, output_config).await;
    std::process::exit(code as i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ba", "--action", "list"]).unwrap();
        assert_eq!(cli.region, "us-east-1");
        assert_eq!(cli.action, Action::List);
        assert_eq!(cli.log_prefix, "logs/");
        assert_eq!(cli.transition_days, 30);
        assert_eq!(cli.expire_days, 365);
        assert!(!cli.public_read);
        assert!(!cli.force);
        assert!(cli.bucket_name.is_none());
    }

    #[test]
    fn test_action_is_required() {
        assert!(Cli::try_parse_from(["ba", "--bucket-name", "media"]).is_err());
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(Cli::try_parse_from(["ba", "--action", "rename"]).is_err());
    }

    #[test]
    fn test_create_flags() {
        let cli = Cli::try_parse_from([
            "ba",
            "--action",
            "create",
            "--bucket-name",
            "media",
            "--public-read",
            "--region",
            "eu-central-1",
        ])
        .unwrap();
        assert_eq!(cli.action, Action::Create);
        assert_eq!(cli.bucket_name.as_deref(), Some("media"));
        assert!(cli.public_read);
        assert_eq!(cli.region, "eu-central-1");
    }

    #[test]
    fn test_lifecycle_flags() {
        let cli = Cli::try_parse_from([
            "ba",
            "--action",
            "lifecycle",
            "--bucket-name",
            "media",
            "--transition-days",
            "7",
            "--expire-days",
            "90",
        ])
        .unwrap();
        assert_eq!(cli.transition_days, 7);
        assert_eq!(cli.expire_days, 90);
    }
}
