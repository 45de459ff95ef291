//! Output formatters for lint reports and configurations

pub mod json;
pub mod text;

use crate::models::LintReport;
use anyhow::Result;

/// Render a lint report in the named format ("text" or "json")
pub fn render_report(report: &LintReport, format: &str) -> Result<String> {
    match format {
        "json" => json::render(report),
        "text" => text::render(report),
        other => anyhow::bail!("Unsupported format: {}", other),
    }
}
