//! Report handler: fetches one server-computed report and prints it as
//! returned.

use serde_json::Value;

use movesys_core::{Console, ReportKind};

use crate::cli::{GlobalOpts, OutputFormat, ReportsArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(console: &Console, args: &ReportsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let kind = parse_kind(&args.kind)?;
    let report = console.reports().fetch(kind).await?;

    let out = match (global.format(), &report) {
        (_, Value::Null) => String::new(),
        (OutputFormat::Plain, _) => serde_json::to_string(&report)?,
        _ => serde_json::to_string_pretty(&report)?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

fn parse_kind(raw: &str) -> Result<ReportKind, CliError> {
    raw.trim().parse().map_err(|_| CliError::Validation {
        field: "report".into(),
        reason: format!(
            "unknown report '{raw}' (expected one of: {})",
            ReportKind::ALL
                .iter()
                .map(ReportKind::as_ref)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })
}
