//! Configuration assembly
//!
//! Combines three static inputs into the `Configuration` handed to the
//! linting engine:
//!
//! - the ignore glob list (`**/node_modules/**` by default)
//! - the ordered custom rule handles
//! - the rule settings decoded from `.markdownlint.yml`
//!
//! Assembly is all-or-nothing. A settings file that is missing or fails to
//! decode makes [`ConfigAssembler::assemble`] fail; no defaults are
//! substituted.

use crate::config::ignore::{IgnorePatterns, DEFAULT_IGNORE_PATTERNS};
use crate::config::settings::{
    parse_yaml, read_settings, RuleSettings, SettingsParser, DEFAULT_SETTINGS_FILE,
};
use crate::error::Result;
use crate::rules::{custom_rules, RuleHandle};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Immutable linter configuration
#[derive(Clone)]
pub struct Configuration {
    ignore_patterns: IgnorePatterns,
    custom_rules: Vec<RuleHandle>,
    rule_settings: RuleSettings,
}

impl Configuration {
    pub fn ignore_patterns(&self) -> &IgnorePatterns {
        &self.ignore_patterns
    }

    pub fn custom_rules(&self) -> &[RuleHandle] {
        &self.custom_rules
    }

    pub fn rule_settings(&self) -> &RuleSettings {
        &self.rule_settings
    }

    /// Whether the engine should skip `path`
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_patterns.is_ignored(path)
    }
}

impl PartialEq for Configuration {
    /// Rule handles compare by identity, in order
    fn eq(&self, other: &Self) -> bool {
        self.ignore_patterns == other.ignore_patterns
            && self.rule_settings == other.rule_settings
            && self.custom_rules.len() == other.custom_rules.len()
            && self
                .custom_rules
                .iter()
                .zip(&other.custom_rules)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule_ids: Vec<&str> = self.custom_rules.iter().map(|r| r.id()).collect();
        f.debug_struct("Configuration")
            .field("ignore_patterns", &self.ignore_patterns.patterns())
            .field("custom_rules", &rule_ids)
            .field("rule_settings", &self.rule_settings)
            .finish()
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let rule_ids: Vec<&str> = self.custom_rules.iter().map(|r| r.id()).collect();
        let mut state = serializer.serialize_struct("Configuration", 3)?;
        state.serialize_field("ignores", self.ignore_patterns.patterns())?;
        state.serialize_field("customRules", &rule_ids)?;
        state.serialize_field("config", &self.rule_settings)?;
        state.end()
    }
}

/// Builds a [`Configuration`] from fixed inputs
#[derive(Clone)]
pub struct ConfigAssembler {
    settings_path: PathBuf,
    ignore_patterns: Vec<String>,
    custom_rules: Vec<RuleHandle>,
    parsers: Vec<SettingsParser>,
}

impl Default for ConfigAssembler {
    /// `.markdownlint.yml` relative to the working directory, default
    /// ignores, the built-in custom rules and the YAML parser
    fn default() -> Self {
        Self::new(
            DEFAULT_SETTINGS_FILE,
            DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            custom_rules(),
        )
    }
}

impl ConfigAssembler {
    pub fn new(
        settings_path: impl Into<PathBuf>,
        ignore_patterns: Vec<String>,
        custom_rules: Vec<RuleHandle>,
    ) -> Self {
        Self {
            settings_path: settings_path.into(),
            ignore_patterns,
            custom_rules,
            parsers: vec![parse_yaml],
        }
    }

    /// Default assembler with the settings file resolved under `root`
    pub fn for_root(root: &Path) -> Self {
        Self {
            settings_path: root.join(DEFAULT_SETTINGS_FILE),
            ..Self::default()
        }
    }

    /// Override the settings file location
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = path.into();
        self
    }

    /// Add a parser tried after the existing ones
    pub fn with_parser(mut self, parser: SettingsParser) -> Self {
        self.parsers.push(parser);
        self
    }

    /// Replace the parser list
    pub fn with_parsers(mut self, parsers: Vec<SettingsParser>) -> Self {
        self.parsers = parsers;
        self
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn custom_rules(&self) -> &[RuleHandle] {
        &self.custom_rules
    }

    /// Read the settings file and build the configuration.
    ///
    /// Fails with [`ConfigLoadError`](crate::error::ConfigLoadError) when the
    /// settings file cannot be read or decoded, or an ignore pattern is not a
    /// valid glob.
    pub fn assemble(&self) -> Result<Configuration> {
        let ignore_patterns = IgnorePatterns::new(self.ignore_patterns.iter().cloned())?;
        let rule_settings = read_settings(&self.settings_path, &self.parsers)?;
        debug!(
            "Ignore patterns: {:?}; custom rules: {:?}",
            ignore_patterns.patterns(),
            self.custom_rules.iter().map(|r| r.id()).collect::<Vec<_>>()
        );
        info!(
            "Assembled configuration from {} ({} rule settings, {} custom rules)",
            self.settings_path.display(),
            rule_settings.len(),
            self.custom_rules.len()
        );
        Ok(Configuration {
            ignore_patterns,
            custom_rules: self.custom_rules.clone(),
            rule_settings,
        })
    }
}
