//! Check command - lint Markdown files with the custom rules

use anyhow::Result;
use mdlint_config::reporters::render_report;
use mdlint_config::{ConfigAssembler, Linter};
use std::path::PathBuf;

pub fn run(assembler: &ConfigAssembler, roots: &[PathBuf], format: &str) -> Result<()> {
    let config = super::assemble(assembler)?;
    let report = Linter::new(&config).lint_paths(roots);

    print!("{}", render_report(&report, format)?);
    if format == "json" {
        println!();
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
