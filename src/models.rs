//! Core data models for lint findings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single rule violation in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Finding {
    /// Identifier of the rule that produced it
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: PathBuf,
    /// 1-based line number
    #[serde(default)]
    pub line: usize,
    /// Extra detail such as `Expected: 3; Actual: 5`
    #[serde(default)]
    pub detail: Option<String>,
    /// Snippet of the offending text
    #[serde(default)]
    pub context: Option<String>,
}

/// Outcome of linting a set of files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintReport {
    pub files_checked: usize,
    pub findings: Vec<Finding>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Finding counts per rule id
    pub fn summary_by_rule(&self) -> BTreeMap<String, usize> {
        let mut summary = BTreeMap::new();
        for f in &self.findings {
            *summary.entry(f.rule.clone()).or_insert(0) += 1;
        }
        summary
    }
}
