//! list action - Enumerate all buckets
//!
//! Prints bucket name and creation timestamp. The listing call is
//! unpaginated; accounts with very large bucket counts see one page.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;

use ba_core::BucketSummary;

use crate::Cli;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

#[derive(Debug, Serialize)]
struct ListOutput {
    buckets: Vec<BucketRow>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct BucketRow {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,
}

pub async fn execute(cli: &Cli, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let orchestrator = match super::setup_orchestrator(cli, &formatter).await {
        Ok(o) => o,
        Err(code) => return code,
    };

    match orchestrator.list().await {
        Ok(buckets) => {
            if formatter.is_json() {
                let rows: Vec<BucketRow> = buckets.iter().map(bucket_row).collect();
                formatter.json(&ListOutput {
                    count: rows.len(),
                    buckets: rows,
                });
            } else if buckets.is_empty() {
                formatter.println("No buckets found.");
            } else {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["Bucket", "Created"]);

                for bucket in &buckets {
                    let row = bucket_row(bucket);
                    table.add_row(vec![
                        row.name,
                        row.created.unwrap_or_else(|| "-".to_string()),
                    ]);
                }

                formatter.println(&table.to_string());
                formatter.println(&format!("Total: {} bucket(s)", buckets.len()));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to list buckets: {e}"));
            ExitCode::GeneralError
        }
    }
}

fn bucket_row(bucket: &BucketSummary) -> BucketRow {
    BucketRow {
        name: bucket.name.clone(),
        created: bucket
            .created
            .map(|t| t.strftime("%Y-%m-%d %H:%M:%S UTC").to_string()),
    }
}
