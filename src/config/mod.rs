//! Configuration module
//!
//! This module handles:
//! - Assembly of the linter `Configuration`
//! - Rule settings files (`.markdownlint.yml`)
//! - Ignore glob patterns

mod assembler;
pub mod ignore;
pub mod settings;

pub use assembler::{ConfigAssembler, Configuration};
pub use ignore::{IgnorePatterns, DEFAULT_IGNORE_PATTERNS};
pub use settings::{
    parse_json, parse_yaml, read_settings, RuleSettings, SettingsParser, DEFAULT_SETTINGS_FILE,
};
