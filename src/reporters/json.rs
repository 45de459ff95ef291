//! JSON reporter
//!
//! Outputs the full LintReport as pretty-printed JSON for jq or CI tooling.

use crate::config::Configuration;
use crate::models::LintReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &LintReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render an assembled configuration as JSON
pub fn render_config(config: &Configuration) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}
