//! Rule settings file reader
//!
//! Reads the per-rule settings mapping (e.g. `.markdownlint.yml`). Decoding
//! is delegated to [`SettingsParser`] handles so the reader itself never
//! knows the on-disk format.
//!
//! ```yaml
//! # .markdownlint.yml
//! extends: ../shared/.markdownlint.yml
//! default: true
//! line-length: false
//! title-case-style:
//!   case: title
//! ```

use crate::error::{ConfigLoadError, Result};
use crate::rules::Rule;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default settings file, relative to the project root
pub const DEFAULT_SETTINGS_FILE: &str = ".markdownlint.yml";

/// Decoding-function handle: turns file text into a settings document
pub type SettingsParser = fn(&str) -> std::result::Result<Value, String>;

/// Decode YAML text (JSON is accepted too, being a YAML subset)
pub fn parse_yaml(text: &str) -> std::result::Result<Value, String> {
    // A stream with no document at all (blank or comments only) is null
    let has_content = text.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    });
    if !has_content {
        return Ok(Value::Null);
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    serde_json::to_value(yaml).map_err(|e| format!("YAML to JSON conversion error: {e}"))
}

/// Decode strict JSON text
pub fn parse_json(text: &str) -> std::result::Result<Value, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

/// Read-only mapping from rule identifiers to their option values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleSettings {
    entries: BTreeMap<String, Value>,
}

impl RuleSettings {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Value of the `default` key, `true` when absent or not a boolean
    pub fn default_enabled(&self) -> bool {
        self.entries
            .get("default")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Whether `rule` should run.
    ///
    /// Keys are matched case-insensitively: rule id and aliases first, then
    /// tags, then the `default` key.
    pub fn is_enabled(&self, rule: &dyn Rule) -> bool {
        let names = std::iter::once(rule.id()).chain(rule.aliases().iter().copied());
        if let Some(value) = self.lookup(names) {
            return is_truthy(value);
        }
        if let Some(value) = self.lookup(rule.tags().iter().copied()) {
            return is_truthy(value);
        }
        self.default_enabled()
    }

    /// Options object for `rule`, empty when the setting is a plain boolean
    pub fn options_for(&self, rule: &dyn Rule) -> Value {
        let names = std::iter::once(rule.id()).chain(rule.aliases().iter().copied());
        match self.lookup(names) {
            Some(value @ Value::Object(_)) => value.clone(),
            _ => Value::Object(serde_json::Map::new()),
        }
    }

    fn lookup<'a>(&self, mut names: impl Iterator<Item = &'a str>) -> Option<&Value> {
        names.find_map(|name| {
            self.entries
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }
}

impl From<BTreeMap<String, Value>> for RuleSettings {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(enabled) => *enabled,
        Value::Null => false,
        _ => true,
    }
}

/// Read the settings file at `path`, decoding it with the first parser that
/// accepts its content.
///
/// An empty document yields empty settings. `extends` chains are followed
/// and the extending file's keys win.
pub fn read_settings(path: &Path, parsers: &[SettingsParser]) -> Result<RuleSettings> {
    let mut chain = Vec::new();
    let entries = read_mapping(path, parsers, &mut chain)?;
    debug!(
        "Loaded {} rule settings from {}",
        entries.len(),
        path.display()
    );
    Ok(RuleSettings::from(entries))
}

fn read_mapping(
    path: &Path,
    parsers: &[SettingsParser],
    chain: &mut Vec<PathBuf>,
) -> Result<BTreeMap<String, Value>> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if chain.contains(&key) {
        return Err(ConfigLoadError::ExtendsCycle {
            path: path.to_path_buf(),
        });
    }
    chain.push(key);

    let mut entries = match decode(path, &content, parsers)? {
        Value::Null => BTreeMap::new(),
        Value::Object(map) => map.into_iter().collect(),
        other => {
            return Err(ConfigLoadError::NotAMapping {
                path: path.to_path_buf(),
                found: kind_name(&other),
            })
        }
    };

    match entries.remove("extends") {
        None | Some(Value::Null) => {}
        Some(Value::String(target)) => {
            let base_path = path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(&target);
            debug!("{} extends {}", path.display(), base_path.display());
            let mut merged = read_mapping(&base_path, parsers, chain)?;
            merged.extend(entries);
            entries = merged;
        }
        Some(other) => {
            return Err(ConfigLoadError::Parse {
                path: path.to_path_buf(),
                message: format!("'extends' must be a file path, found {}", kind_name(&other)),
            })
        }
    }

    chain.pop();
    Ok(entries)
}

fn decode(path: &Path, content: &str, parsers: &[SettingsParser]) -> Result<Value> {
    let mut last_error = String::from("no settings parser configured");
    for parser in parsers {
        match parser(content) {
            Ok(value) => return Ok(value),
            Err(message) => last_error = message,
        }
    }
    Err(ConfigLoadError::Parse {
        path: path.to_path_buf(),
        message: last_error,
    })
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{custom_rules, EnhancedProperNames, TitleCaseStyle};
    use serde_json::json;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).expect("write fixture");
        path
    }

    #[test]
    fn test_reads_yaml_mapping() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            dir.path(),
            ".markdownlint.yml",
            "line-length: false\nheading-style:\n  style: atx\n",
        );
        let settings = read_settings(&path, &[parse_yaml]).expect("read settings");
        assert_eq!(settings.get("line-length"), Some(&json!(false)));
        assert_eq!(settings.get("heading-style"), Some(&json!({"style": "atx"})));
        assert_eq!(settings.len(), 2);
    }

    #[test]
    fn test_flow_mapping() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "s.yaml", r#"{"line-length": false}"#);
        let settings = read_settings(&path, &[parse_yaml]).expect("read settings");
        assert_eq!(settings.get("line-length"), Some(&json!(false)));
    }

    #[test]
    fn test_empty_document_is_empty_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "empty.yaml", "");
        let settings = read_settings(&path, &[parse_yaml]).expect("read settings");
        assert!(settings.is_empty());

        let path = write(dir.path(), "tilde.yaml", "~\n");
        assert!(read_settings(&path, &[parse_yaml]).expect("read").is_empty());
    }

    #[test]
    fn test_scalar_document_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "scalar.yaml", "just a string\n");
        let err = read_settings(&path, &[parse_yaml]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::NotAMapping { found: "a string", .. }));

        let path = write(dir.path(), "list.yaml", "- a\n- b\n");
        let err = read_settings(&path, &[parse_yaml]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::NotAMapping { found: "a sequence", .. }));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "bad.yaml", "line-length: [unclosed\n");
        let err = read_settings(&path, &[parse_yaml]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_settings(&dir.path().join("nope.yaml"), &[parse_yaml]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Read { .. }));
    }

    #[test]
    fn test_parsers_tried_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "s.yaml", "line-length: false\n");
        // JSON rejects the YAML block syntax, YAML then accepts it
        let settings = read_settings(&path, &[parse_json, parse_yaml]).expect("read settings");
        assert_eq!(settings.get("line-length"), Some(&json!(false)));

        let err = read_settings(&path, &[parse_json]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));

        let err = read_settings(&path, &[]).unwrap_err();
        assert!(
            matches!(err, ConfigLoadError::Parse { ref message, .. } if message.contains("no settings parser"))
        );
    }

    #[test]
    fn test_extends_merges_and_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("shared")).expect("mkdir");
        write(
            &dir.path().join("shared"),
            "base.yaml",
            "line-length: false\ntitle-case-style: true\n",
        );
        let path = write(
            dir.path(),
            ".markdownlint.yml",
            "extends: shared/base.yaml\ntitle-case-style: false\n",
        );
        let settings = read_settings(&path, &[parse_yaml]).expect("read settings");
        assert_eq!(settings.get("line-length"), Some(&json!(false)));
        assert_eq!(settings.get("title-case-style"), Some(&json!(false)));
        assert!(settings.get("extends").is_none());
    }

    #[test]
    fn test_extends_cycle_detected() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "a.yaml", "extends: b.yaml\n");
        let b = write(dir.path(), "b.yaml", "extends: a.yaml\n");
        let err = read_settings(&b, &[parse_yaml]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::ExtendsCycle { .. }));
    }

    #[test]
    fn test_extends_missing_target() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "a.yaml", "extends: gone.yaml\n");
        let err = read_settings(&path, &[parse_yaml]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Read { .. }));
    }

    #[test]
    fn test_rule_enablement() {
        let names = EnhancedProperNames::new();
        let titles = TitleCaseStyle::new();

        let settings = RuleSettings::default();
        assert!(settings.is_enabled(&names));

        let settings: RuleSettings = BTreeMap::from([
            ("default".to_string(), json!(false)),
            ("TITLE-CASE".to_string(), json!(true)),
        ])
        .into();
        assert!(settings.is_enabled(&titles), "alias matched case-insensitively");
        assert!(!settings.is_enabled(&names), "falls back to default: false");

        let settings: RuleSettings =
            BTreeMap::from([("headings".to_string(), json!(false))]).into();
        assert!(!settings.is_enabled(&titles), "disabled by tag");
        assert!(settings.is_enabled(&names));
    }

    #[test]
    fn test_options_for_rule() {
        let rules = custom_rules();
        let settings: RuleSettings = BTreeMap::from([
            ("enhanced-proper-names".to_string(), json!({"names": ["GitHub"]})),
            ("title-case-style".to_string(), json!(true)),
        ])
        .into();
        assert_eq!(
            settings.options_for(rules[0].as_ref()),
            json!({"names": ["GitHub"]})
        );
        assert_eq!(settings.options_for(rules[1].as_ref()), json!({}));
    }
}
