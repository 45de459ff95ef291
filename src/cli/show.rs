//! Show command - print the assembled configuration

use anyhow::Result;
use mdlint_config::reporters::{json, text};
use mdlint_config::ConfigAssembler;

pub fn run(assembler: &ConfigAssembler, format: &str) -> Result<()> {
    let config = super::assemble(assembler)?;
    let output = match format {
        "json" => json::render_config(&config)?,
        _ => text::render_config(&config, assembler.settings_path())?,
    };
    print!("{output}");
    if format == "json" {
        println!();
    }
    Ok(())
}
