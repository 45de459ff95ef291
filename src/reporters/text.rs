//! Text (terminal) reporter

use crate::config::Configuration;
use crate::models::LintReport;
use anyhow::Result;
use console::style;
use std::fmt::Write;

/// One line per finding: `path:line rule description [detail] [Context: "..."]`
pub fn render(report: &LintReport) -> Result<String> {
    let mut out = String::new();

    for f in &report.findings {
        let location = format!("{}:{}", f.path.display(), f.line);
        write!(
            out,
            "{} {} {}",
            style(location).bold(),
            style(&f.rule).yellow(),
            f.description
        )?;
        if let Some(detail) = &f.detail {
            write!(out, " [{detail}]")?;
        }
        if let Some(context) = &f.context {
            write!(out, " [Context: \"{context}\"]")?;
        }
        out.push('\n');
    }

    let summary = format!(
        "{} file(s) checked, {} finding(s)",
        report.files_checked,
        report.findings.len()
    );
    if report.is_clean() {
        writeln!(out, "{}", style(summary).green())?;
    } else {
        writeln!(out, "{}", style(summary).red())?;
    }
    Ok(out)
}

/// Human-readable dump of an assembled configuration
pub fn render_config(config: &Configuration, settings_path: &std::path::Path) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", style("Settings file").bold())?;
    writeln!(out, "  {}", settings_path.display())?;

    writeln!(out, "{}", style("Ignore patterns").bold())?;
    for pattern in config.ignore_patterns().patterns() {
        writeln!(out, "  {pattern}")?;
    }

    writeln!(out, "{}", style("Custom rules").bold())?;
    for rule in config.custom_rules() {
        let state = if config.rule_settings().is_enabled(rule.as_ref()) {
            style("enabled").green()
        } else {
            style("disabled").dim()
        };
        writeln!(out, "  {} ({})", rule.id(), state)?;
    }

    writeln!(out, "{}", style("Rule settings").bold())?;
    if config.rule_settings().is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (key, value) in config.rule_settings().iter() {
        writeln!(out, "  {key}: {value}")?;
    }
    Ok(out)
}
