//! Ignore patterns
//!
//! Compiled glob list deciding which files the linter never scans.

use crate::error::{ConfigLoadError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Built-in ignore patterns. Dependency trees are never linted.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["**/node_modules/**"];

/// Ordered glob patterns plus their compiled matcher
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
    matcher: GlobSet,
}

impl IgnorePatterns {
    /// Compile `patterns`, keeping their order
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| ConfigLoadError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        let matcher = builder.build().map_err(|source| ConfigLoadError::Pattern {
            pattern: patterns.join(", "),
            source,
        })?;
        Ok(Self { patterns, matcher })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `path` matches any pattern.
    ///
    /// Backslashes are treated as separators and a leading `./` is dropped,
    /// so `./a/node_modules/x.md` and `a\node_modules\x.md` behave the same.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        let trimmed = normalized.trim_start_matches("./");
        self.matcher.is_match(trimmed)
    }
}

impl PartialEq for IgnorePatterns {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
    }
}

impl Eq for IgnorePatterns {}
