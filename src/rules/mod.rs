//! Custom rule plugins
//!
//! This module defines the contract every custom rule implements:
//! - `Rule` trait exposing identity, description and the check function
//! - `RuleParams` passed to `check`
//! - `custom_rules()` listing the built-in plugin handles in registration order

mod document;
mod enhanced_proper_names;
mod title_case_style;

pub use document::{Document, Line};
pub use enhanced_proper_names::EnhancedProperNames;
pub use title_case_style::TitleCaseStyle;

use crate::models::Finding;
use serde_json::Value;
use std::sync::Arc;

/// Input to [`Rule::check`]
#[derive(Debug, Clone, Copy)]
pub struct RuleParams<'a> {
    pub document: &'a Document,
    /// The rule's options from the settings file (an object, possibly empty)
    pub config: &'a Value,
}

impl<'a> RuleParams<'a> {
    pub fn new(document: &'a Document, config: &'a Value) -> Self {
        Self { document, config }
    }

    /// Typed option lookup
    pub fn option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.config
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Option with a fallback value
    pub fn option_or<T: serde::de::DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.option(key).unwrap_or(default)
    }
}

/// Trait for custom lint rules
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyRule;
///
/// impl Rule for MyRule {
///     fn id(&self) -> &'static str {
///         "my-rule"
///     }
///
///     fn description(&self) -> &'static str {
///         "Flags my specific problem"
///     }
///
///     fn check(&self, params: &RuleParams<'_>) -> Vec<Finding> {
///         vec![]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Unique identifier, used as the settings key (e.g. "title-case-style")
    fn id(&self) -> &'static str;

    /// Alternative settings keys
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Human-readable description of what this rule reports
    fn description(&self) -> &'static str;

    /// Group names; a settings key matching a tag toggles every rule carrying it
    fn tags(&self) -> &'static [&'static str] {
        &[]
    }

    /// Link to documentation for the rule
    fn information(&self) -> Option<&'static str> {
        None
    }

    /// Check one document and return its violations
    fn check(&self, params: &RuleParams<'_>) -> Vec<Finding>;

    /// Build a finding pre-filled with this rule's identity
    fn finding(&self, document: &Document, line: usize) -> Finding {
        Finding {
            rule: self.id().to_string(),
            description: self.description().to_string(),
            path: document.path().to_path_buf(),
            line,
            ..Default::default()
        }
    }
}

/// Shared handle to a rule plugin
pub type RuleHandle = Arc<dyn Rule>;

/// The built-in custom rules, in registration order
pub fn custom_rules() -> Vec<RuleHandle> {
    vec![
        Arc::new(EnhancedProperNames::new()),
        Arc::new(TitleCaseStyle::new()),
    ]
}
