//! Line-classified view of a Markdown document handed to rules.

use std::path::{Path, PathBuf};

/// One source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    pub text: String,
    /// Inside a fenced code block (fence lines included)
    pub in_code: bool,
    /// Part of a leading YAML front matter block
    pub in_front_matter: bool,
}

impl Line {
    /// Prose lines are the ones rules about text should look at
    pub fn is_prose(&self) -> bool {
        !self.in_code && !self.in_front_matter
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    content: String,
    lines: Vec<Line>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let lines = classify_lines(&content);
        Self {
            path: path.into(),
            content,
            lines,
        }
    }

    /// Read a document from disk
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(path, content))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

struct Fence {
    marker: char,
    len: usize,
}

/// Opening/closing fence: up to three spaces, then 3+ backticks or tildes
fn fence_of(line: &str) -> Option<Fence> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = rest.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some(Fence { marker, len })
}

fn classify_lines(content: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut open_fence: Option<Fence> = None;
    let mut in_front_matter = content.lines().next().map(str::trim_end) == Some("---");

    for (idx, text) in content.lines().enumerate() {
        if in_front_matter {
            let closes = idx > 0 && matches!(text.trim_end(), "---" | "...");
            lines.push(Line {
                number: idx + 1,
                text: text.to_string(),
                in_code: false,
                in_front_matter: true,
            });
            if closes {
                in_front_matter = false;
            }
            continue;
        }

        let fence = fence_of(text);
        let in_code = match open_fence.take() {
            None => match fence {
                Some(opening) => {
                    open_fence = Some(opening);
                    true
                }
                None => false,
            },
            // Closing fence: same marker, at least as long, nothing after it
            Some(open) => {
                let closes = fence.is_some_and(|f| {
                    f.marker == open.marker
                        && f.len >= open.len
                        && text.trim().chars().all(|c| c == open.marker)
                });
                if !closes {
                    open_fence = Some(open);
                }
                true
            }
        };

        lines.push(Line {
            number: idx + 1,
            text: text.to_string(),
            in_code,
            in_front_matter: false,
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_code_flagged() {
        let doc = Document::new(
            "a.md",
            "# Title\n\n```rust\nlet x = 1;\n```\n\nAfter\n",
        );
        let code: Vec<usize> = doc
            .lines()
            .iter()
            .filter(|l| l.in_code)
            .map(|l| l.number)
            .collect();
        assert_eq!(code, vec![3, 4, 5]);
        assert!(doc.lines()[6].is_prose());
    }

    #[test]
    fn test_closing_fence_must_match_marker() {
        let doc = Document::new("a.md", "~~~~\n```\nstill code\n~~~~\nprose\n");
        let flags: Vec<bool> = doc.lines().iter().map(|l| l.in_code).collect();
        assert_eq!(flags, vec![true, true, true, true, false]);
    }

    #[test]
    fn test_front_matter() {
        let doc = Document::new("a.md", "---\ntitle: x\n---\nBody\n");
        let fm: Vec<bool> = doc.lines().iter().map(|l| l.in_front_matter).collect();
        assert_eq!(fm, vec![true, true, true, false]);
    }

    #[test]
    fn test_thematic_break_is_not_front_matter_later() {
        let doc = Document::new("a.md", "Intro\n\n---\n\nMore\n");
        assert!(doc.lines().iter().all(|l| !l.in_front_matter));
        assert_eq!(doc.line_count(), 5);
    }

    #[test]
    fn test_indented_fence_is_code_block_text() {
        let doc = Document::new("a.md", "    ```\nprose\n");
        assert!(doc.lines().iter().all(|l| !l.in_code));
    }
}
