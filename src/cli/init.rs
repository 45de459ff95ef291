//! Init command - write an example settings file

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const EXAMPLE_SETTINGS: &str = r#"# Markdown lint settings
#
# Keys are rule identifiers (or aliases, or tags). `false` disables a rule,
# `true` enables it, a mapping enables it with options.

# Rules not listed below follow this value
default: true

# Share settings with another file; keys here win
# extends: ../shared/.markdownlint.yml

line-length: false

enhanced-proper-names:
  names: [GitHub, JavaScript, Markdown]
  code_blocks: false

title-case-style:
  case: sentence
  ignore: [Markdown]
"#;

pub fn run(settings_path: &Path, force: bool) -> Result<()> {
    if settings_path.exists() && !force {
        println!(
            "{} Settings file already exists at {} (use --force to overwrite)",
            style("✓").green(),
            style(settings_path.display()).cyan()
        );
        return Ok(());
    }

    if let Some(parent) = settings_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(settings_path, EXAMPLE_SETTINGS)
        .with_context(|| format!("Failed to write {}", settings_path.display()))?;

    println!(
        "{} Created {}",
        style("✓").green(),
        style(settings_path.display()).cyan()
    );
    Ok(())
}
