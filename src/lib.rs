//! mdlint-config - configuration assembly for a Markdown linter
//!
//! Builds one immutable [`Configuration`] from a fixed ignore list, an
//! ordered list of custom rule plugins and the rule settings decoded from
//! `.markdownlint.yml`.
//!
//! ```ignore
//! use mdlint_config::ConfigAssembler;
//!
//! let config = ConfigAssembler::default().assemble()?;
//! assert!(config.is_ignored("a/node_modules/b/c.md".as_ref()));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod reporters;
pub mod rules;

pub use config::{ConfigAssembler, Configuration, IgnorePatterns, RuleSettings};
pub use engine::Linter;
pub use error::ConfigLoadError;
pub use models::{Finding, LintReport};
pub use rules::{custom_rules, Document, Rule, RuleHandle, RuleParams};
