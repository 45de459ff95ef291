//! Proper names spelled with the wrong capitalization

use super::{Document, Rule, RuleParams};
use crate::models::Finding;
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;
use tracing::{debug, warn};

static CODE_SPAN: OnceLock<Regex> = OnceLock::new();
static LINK_TARGET: OnceLock<Regex> = OnceLock::new();

fn code_span() -> &'static Regex {
    CODE_SPAN.get_or_init(|| Regex::new(r"`+[^`]*`+").expect("valid regex"))
}

/// Inline link destinations and bare URLs
fn link_target() -> &'static Regex {
    LINK_TARGET.get_or_init(|| {
        Regex::new(r"\]\([^)]*\)|<?https?://[^\s>)]+>?").expect("valid regex")
    })
}

/// Overwrite every match with spaces; byte offsets of the rest stay put
fn blank_out(text: &str, pattern: &Regex) -> String {
    pattern
        .replace_all(text, |caps: &regex::Captures<'_>| " ".repeat(caps[0].len()))
        .into_owned()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The match is not part of a longer word
fn standalone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

struct NameMatcher {
    name: String,
    pattern: Regex,
}

/// Case-insensitive matchers, longest name first so `Node.js` wins over `Node`
fn matchers(id: &str, names: Vec<String>) -> Vec<NameMatcher> {
    let mut names: Vec<String> = names.into_iter().filter(|n| !n.trim().is_empty()).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names.dedup();
    names
        .into_iter()
        .filter_map(|name| {
            match RegexBuilder::new(&regex::escape(&name))
                .case_insensitive(true)
                .build()
            {
                Ok(pattern) => Some(NameMatcher { name, pattern }),
                Err(e) => {
                    warn!("{id}: skipping name '{name}': {e}");
                    None
                }
            }
        })
        .collect()
}

/// Flags proper names whose capitalization differs from the configured
/// spelling.
///
/// Options:
/// - `names: [..]` the expected spellings (nothing is checked without them)
/// - `code_blocks: bool` also check fenced code and code spans (default false)
///
/// Front matter, link destinations and bare URLs are never checked.
#[derive(Debug, Default)]
pub struct EnhancedProperNames;

impl EnhancedProperNames {
    pub fn new() -> Self {
        Self
    }

    fn check_line(
        &self,
        document: &Document,
        number: usize,
        source: &str,
        text: &str,
        matchers: &[NameMatcher],
    ) -> Vec<Finding> {
        let mut taken: Vec<(usize, usize)> = Vec::new();
        let mut hits: Vec<(usize, &str, &str)> = Vec::new();

        for matcher in matchers {
            for found in matcher.pattern.find_iter(text) {
                let (start, end) = (found.start(), found.end());
                if !standalone(text, start, end)
                    || taken.iter().any(|&(s, e)| start < e && s < end)
                {
                    continue;
                }
                taken.push((start, end));
                if found.as_str() != matcher.name {
                    hits.push((start, matcher.name.as_str(), found.as_str()));
                }
            }
        }
        hits.sort_by_key(|hit| hit.0);

        hits.into_iter()
            .map(|(_, expected, actual)| {
                let mut finding = self.finding(document, number);
                finding.detail = Some(format!("Expected: {expected}; Actual: {actual}"));
                finding.context = Some(source.trim().to_string());
                finding
            })
            .collect()
    }
}

impl Rule for EnhancedProperNames {
    fn id(&self) -> &'static str {
        "enhanced-proper-names"
    }

    fn description(&self) -> &'static str {
        "Proper names should have the correct capitalization"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["spelling"]
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://www.npmjs.com/package/markdownlint-rule-enhanced-proper-names")
    }

    fn check(&self, params: &RuleParams<'_>) -> Vec<Finding> {
        let names: Vec<String> = match params.config.get("names") {
            None => Vec::new(),
            Some(raw) => params.option("names").unwrap_or_else(|| {
                warn!("{}: 'names' must be a list of strings, got {}", self.id(), raw);
                Vec::new()
            }),
        };
        let matchers = matchers(self.id(), names);
        if matchers.is_empty() {
            return Vec::new();
        }
        let code_blocks = params.option_or("code_blocks", false);

        let mut findings = Vec::new();
        for line in params.document.lines() {
            if line.in_front_matter || (line.in_code && !code_blocks) {
                continue;
            }
            let mut text = blank_out(&line.text, link_target());
            if !code_blocks {
                text = blank_out(&text, code_span());
            }
            findings.extend(self.check_line(
                params.document,
                line.number,
                &line.text,
                &text,
                &matchers,
            ));
        }
        debug!(
            "{} found {} misspelled names in {}",
            self.id(),
            findings.len(),
            params.document.path().display()
        );
        findings
    }
}
