//! Heading capitalization style

use super::{Document, Line, Rule, RuleParams};
use crate::models::Finding;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Lowercase inside a title-case heading unless first or last
const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "from", "in", "into", "nor", "of", "on", "or",
    "per", "so", "the", "to", "up", "via", "vs", "with", "yet",
];

static ATX_HEADING: OnceLock<Regex> = OnceLock::new();
static SETEXT_UNDERLINE: OnceLock<Regex> = OnceLock::new();

fn atx_heading() -> &'static Regex {
    ATX_HEADING.get_or_init(|| {
        Regex::new(r"^ {0,3}#{1,6}(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$").expect("valid regex")
    })
}

fn setext_underline() -> &'static Regex {
    SETEXT_UNDERLINE.get_or_init(|| Regex::new(r"^ {0,3}(?:=+|-+)[ \t]*$").expect("valid regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Case {
    /// Only the first word (and the first after a colon) starts uppercase
    Sentence,
    /// Every word except minor words starts uppercase
    Title,
}

/// Heading text of `line`, if it is an ATX or setext heading
fn heading_text<'a>(
    previous: Option<&Line>,
    line: &'a Line,
    next: Option<&Line>,
) -> Option<&'a str> {
    if let Some(caps) = atx_heading().captures(&line.text) {
        return caps.get(1).map(|m| m.as_str().trim());
    }
    // Setext: a single paragraph line underlined with `=` or `-`
    let opens_paragraph = previous.map_or(true, |p| !p.is_prose() || p.text.trim().is_empty());
    let underlined = next.is_some_and(|n| n.is_prose() && setext_underline().is_match(&n.text));
    let indent = line.text.len() - line.text.trim_start().len();
    let text = line.text.trim();
    (opens_paragraph && underlined && indent < 4 && !text.is_empty()).then_some(text)
}

fn has_letter(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
}

fn core(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Words whose spelling is not a capitalization choice: acronyms, brand
/// casing, paths, versions, the pronoun `I` and configured exceptions
fn keep_as_written(word: &str, ignore: &[String]) -> bool {
    let core = core(word);
    core == "I"
        || ignore.iter().any(|w| w == core)
        || core.chars().skip(1).any(char::is_uppercase)
        || core.contains(['/', '.', '_'])
        || core.chars().any(|c| c.is_ascii_digit())
}

fn set_initial(word: &str, upper: bool) -> String {
    match word.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((idx, c)) => {
            let mut out = String::with_capacity(word.len());
            out.push_str(&word[..idx]);
            if upper {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            out.push_str(&word[idx + c.len_utf8()..]);
            out
        }
        None => word.to_string(),
    }
}

/// `heading` rewritten in `case`
fn apply_case(heading: &str, case: Case, ignore: &[String]) -> String {
    let words: Vec<&str> = heading.split(' ').collect();
    let last = words.iter().rposition(|w| has_letter(w));
    let mut seen_word = false;
    let mut after_colon = false;
    let mut in_code = false;
    let mut out = Vec::with_capacity(words.len());

    for (idx, word) in words.iter().enumerate() {
        let ticks = word.matches('`').count();
        if in_code || ticks > 0 {
            if ticks % 2 == 1 {
                in_code = !in_code;
            }
            seen_word = true;
            after_colon = false;
            out.push(word.to_string());
            continue;
        }
        if !has_letter(word) {
            out.push(word.to_string());
            continue;
        }

        let first = !seen_word;
        let follows_colon = after_colon;
        seen_word = true;
        after_colon = word.ends_with(':');

        if follows_colon || keep_as_written(word, ignore) {
            out.push(word.to_string());
            continue;
        }
        let upper = match case {
            Case::Sentence => first,
            Case::Title => {
                first
                    || Some(idx) == last
                    || !MINOR_WORDS.contains(&core(word).to_lowercase().as_str())
            }
        };
        out.push(set_initial(word, upper));
    }
    out.join(" ")
}

/// Flags headings that do not follow the configured capitalization.
///
/// Options:
/// - `case: sentence | title` (default `sentence`; `style` is accepted too)
/// - `ignore: [..]` words left exactly as written, e.g. product names
#[derive(Debug, Default)]
pub struct TitleCaseStyle;

impl TitleCaseStyle {
    pub fn new() -> Self {
        Self
    }

    fn case_option(&self, params: &RuleParams<'_>) -> Case {
        for key in ["case", "style"] {
            if let Some(raw) = params.config.get(key) {
                match serde_json::from_value::<Case>(raw.clone()) {
                    Ok(case) => return case,
                    Err(_) => warn!(
                        "{}: unknown {} {}, using sentence case",
                        self.id(),
                        key,
                        raw
                    ),
                }
            }
        }
        Case::Sentence
    }
}

impl Rule for TitleCaseStyle {
    fn id(&self) -> &'static str {
        "title-case-style"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["title-case"]
    }

    fn description(&self) -> &'static str {
        "Headings should use a consistent capitalization style"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["headings"]
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://www.npmjs.com/package/markdownlint-rule-title-case-style")
    }

    fn check(&self, params: &RuleParams<'_>) -> Vec<Finding> {
        let case = self.case_option(params);
        let ignore: Vec<String> = params.option_or("ignore", Vec::new());
        let document: &Document = params.document;
        let lines = document.lines();

        let mut findings = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            if !line.is_prose() {
                continue;
            }
            let previous = idx.checked_sub(1).and_then(|i| lines.get(i));
            let Some(text) = heading_text(previous, line, lines.get(idx + 1)) else {
                continue;
            };
            let expected = apply_case(text, case, &ignore);
            if expected != text {
                let mut finding = self.finding(document, line.number);
                finding.detail = Some(format!("Expected: {expected}; Actual: {text}"));
                finding.context = Some(line.text.trim().to_string());
                findings.push(finding);
            }
        }
        debug!(
            "{} found {} headings off {:?} case in {}",
            self.id(),
            findings.len(),
            case,
            document.path().display()
        );
        findings
    }
}
