//! CLI command definitions and handlers

mod check;
mod init;
mod rules;
mod show;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mdlint_config::{ConfigAssembler, Configuration};
use std::path::{Path, PathBuf};

/// mdlint-config - assemble and inspect Markdown lint configuration
#[derive(Parser, Debug)]
#[command(name = "mdlint-config")]
#[command(
    version,
    about = "Assemble Markdown lint configuration: ignore globs, custom rules and .markdownlint.yml settings",
    after_help = "\
Examples:
  mdlint-config show                     Print the assembled configuration
  mdlint-config show --format json       JSON output for scripting
  mdlint-config rules                    List the custom rules
  mdlint-config check docs README.md     Lint files with the custom rules
  mdlint-config init                     Write an example .markdownlint.yml"
)]
pub struct Cli {
    /// Project root holding .markdownlint.yml (default: current directory)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Settings file to use instead of <root>/.markdownlint.yml
    #[arg(long, global = true, env = "MDLINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the assembled configuration
    Show {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List the registered custom rules
    Rules,

    /// Lint Markdown files with the custom rules (exit code 1 on findings)
    Check {
        /// Files or directories to lint (default: the project root)
        paths: Vec<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Write an example .markdownlint.yml into the project root
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let assembler = assembler_for(&cli.root, cli.config.as_deref());
    match cli.command {
        Commands::Show { format } => show::run(&assembler, &format),
        Commands::Rules => rules::run(&assembler),
        Commands::Check { paths, format } => {
            let roots = if paths.is_empty() {
                vec![cli.root.clone()]
            } else {
                paths
            };
            check::run(&assembler, &roots, &format)
        }
        Commands::Init { force } => init::run(assembler.settings_path(), force),
    }
}

fn assembler_for(root: &Path, config: Option<&Path>) -> ConfigAssembler {
    let assembler = ConfigAssembler::for_root(root);
    match config {
        Some(path) => assembler.with_settings_path(path),
        None => assembler,
    }
}

/// Assemble, attaching the settings path to any failure
fn assemble(assembler: &ConfigAssembler) -> Result<Configuration> {
    assembler.assemble().with_context(|| {
        format!(
            "Failed to assemble configuration from {}",
            assembler.settings_path().display()
        )
    })
}
