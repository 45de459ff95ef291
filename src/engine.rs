//! Lint engine
//!
//! Consumes an assembled [`Configuration`]: discovers Markdown files outside
//! the ignore patterns and runs every enabled custom rule on them.

use crate::config::Configuration;
use crate::models::{Finding, LintReport};
use crate::rules::{Document, RuleParams};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File extensions treated as Markdown
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKDOWN_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

pub struct Linter<'a> {
    config: &'a Configuration,
}

impl<'a> Linter<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// Markdown files under `roots`, minus ignored paths, sorted.
    ///
    /// Patterns are matched against each path relative to the root it was
    /// found under and against the path as walked, so a root that is itself
    /// inside an ignored tree yields nothing. A root that is a file is
    /// matched as given.
    pub fn discover(&self, roots: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for root in roots {
            if root.is_file() {
                if is_markdown(root) && !self.config.is_ignored(root) {
                    files.push(root.clone());
                }
                continue;
            }

            let walker = WalkBuilder::new(root)
                .hidden(true)
                .git_ignore(true)
                .git_global(false)
                .git_exclude(true)
                .require_git(false)
                .build();

            for entry in walker.flatten() {
                let path = entry.path();
                if !path.is_file() || !is_markdown(path) {
                    continue;
                }
                let relative = path.strip_prefix(root).unwrap_or(path);
                if self.config.is_ignored(relative) || self.config.is_ignored(path) {
                    debug!("Ignoring {}", path.display());
                    continue;
                }
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files.dedup();
        files
    }

    /// Run every enabled custom rule on `document`
    pub fn lint_document(&self, document: &Document) -> Vec<Finding> {
        let settings = self.config.rule_settings();
        let mut findings = Vec::new();
        for rule in self.config.custom_rules() {
            if !settings.is_enabled(rule.as_ref()) {
                continue;
            }
            let options = settings.options_for(rule.as_ref());
            findings.extend(rule.check(&RuleParams::new(document, &options)));
        }
        findings
    }

    /// Discover and lint files under `roots`.
    ///
    /// Infallible: unreadable files are logged, skipped and left out of
    /// `files_checked`.
    pub fn lint_paths(&self, roots: &[PathBuf]) -> LintReport {
        let files = self.discover(roots);
        info!("Linting {} Markdown files", files.len());

        let per_file: Vec<Vec<Finding>> = files
            .par_iter()
            .filter_map(|path| match Document::read(path) {
                Ok(document) => Some(self.lint_document(&document)),
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    None
                }
            })
            .collect();
        let files_checked = per_file.len();
        let mut findings: Vec<Finding> = per_file.into_iter().flatten().collect();

        findings.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then(a.line.cmp(&b.line))
                .then_with(|| a.rule.cmp(&b.rule))
        });

        LintReport {
            files_checked,
            findings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigAssembler;

    fn setup(settings: &str) -> (tempfile::TempDir, Configuration) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        std::fs::write(root.join(".markdownlint.yml"), settings).expect("write settings");
        std::fs::create_dir_all(root.join("docs")).expect("mkdir");
        std::fs::create_dir_all(root.join("web/node_modules/pkg")).expect("mkdir");
        std::fs::write(root.join("README.md"), "# Project Readme\n\nHosted on github.\n")
            .expect("write");
        std::fs::write(root.join("docs/guide.markdown"), "# Guide\n\nAll done.\n").expect("write");
        std::fs::write(root.join("docs/notes.txt"), "# Not Markdown\n").expect("write");
        std::fs::write(
            root.join("web/node_modules/pkg/README.md"),
            "# Vendored Package\n\nSee github.\n",
        )
        .expect("write");
        let config = ConfigAssembler::for_root(root).assemble().expect("assemble");
        (dir, config)
    }

    #[test]
    fn test_discover_skips_ignored_and_non_markdown() {
        let (dir, config) = setup("{}");
        let linter = Linter::new(&config);
        let files = linter.discover(&[dir.path().to_path_buf()]);
        let names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .expect("under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(names, vec!["README.md", "docs/guide.markdown"]);
    }

    #[test]
    fn test_root_inside_node_modules_is_ignored() {
        let (dir, config) = setup("{}");
        let linter = Linter::new(&config);
        let vendored = dir.path().join("web/node_modules");
        assert!(linter.discover(&[vendored.clone()]).is_empty());
        assert!(linter.discover(&[vendored.join("pkg")]).is_empty());

        let report = linter.lint_paths(&[vendored]);
        assert_eq!(report.files_checked, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_lint_paths_reports_findings() {
        let (dir, config) = setup("enhanced-proper-names:\n  names: [GitHub]\n");
        let report = Linter::new(&config).lint_paths(&[dir.path().to_path_buf()]);
        assert_eq!(report.files_checked, 2);
        let found: Vec<(&str, usize)> = report
            .findings
            .iter()
            .map(|f| (f.rule.as_str(), f.line))
            .collect();
        assert_eq!(
            found,
            vec![("title-case-style", 1), ("enhanced-proper-names", 3)]
        );
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let (dir, config) = setup("{}");
        std::fs::write(dir.path().join("docs/binary.md"), [0xff, 0xfe, 0x00]).expect("write");
        let linter = Linter::new(&config);
        assert_eq!(linter.discover(&[dir.path().to_path_buf()]).len(), 3);

        let report = linter.lint_paths(&[dir.path().to_path_buf()]);
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.findings.len(), 1);
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let (dir, config) = setup("title-case-style: false\n");
        let report = Linter::new(&config).lint_paths(&[dir.path().to_path_buf()]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_rule_options_are_passed() {
        let (_dir, config) = setup("title-case-style:\n  case: title\n");
        let doc = Document::new("x.md", "# Project readme\n");
        let findings = Linter::new(&config).lint_document(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "title-case-style");
        assert_eq!(
            findings[0].detail.as_deref(),
            Some("Expected: Project Readme; Actual: Project readme")
        );
    }

    #[test]
    fn test_file_root_is_linted_directly() {
        let (dir, config) = setup("{}");
        let readme = dir.path().join("README.md");
        let report = Linter::new(&config).lint_paths(&[readme]);
        assert_eq!(report.files_checked, 1);
        assert_eq!(report.summary_by_rule().get("title-case-style"), Some(&1));
    }
}
