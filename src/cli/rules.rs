//! Rules command - list the registered custom rules

use anyhow::Result;
use console::style;
use mdlint_config::ConfigAssembler;

pub fn run(assembler: &ConfigAssembler) -> Result<()> {
    for rule in assembler.custom_rules() {
        let mut names = vec![rule.id()];
        names.extend(rule.aliases().iter().copied());
        println!("{} {}", style(names.join("/")).bold(), rule.description());
        if !rule.tags().is_empty() {
            println!("  tags: {}", rule.tags().join(", "));
        }
        if let Some(url) = rule.information() {
            println!("  see: {url}");
        }
    }
    Ok(())
}
