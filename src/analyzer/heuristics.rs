//! Content heuristics for well-known project documents
//!
//! Each heuristic is a named regex searched anywhere in the file. A missing
//! match is a warning; these are suggestions, never structural errors.

use crate::domain::findings::{RulecheckError, RulecheckResult};
use crate::analyzer::FileChecks;
use crate::patterns::compile;
use regex::Regex;
use std::path::Path;

/// Which files a heuristic check applies to
#[derive(Debug, Clone)]
pub enum FileMatcher {
    /// A file with this name directly in the validated root
    RootFile(String),
    /// A file with this name anywhere
    AnyFile(String),
}

impl FileMatcher {
    fn matches(&self, path: &Path, root: &Path) -> bool {
        let name_matches = |expected: &str| {
            path.file_name()
                .map(|name| name.to_string_lossy().eq_ignore_ascii_case(expected))
                .unwrap_or(false)
        };

        match self {
            Self::RootFile(name) => name_matches(name) && path.parent() == Some(root),
            Self::AnyFile(name) => name_matches(name),
        }
    }
}

/// One expected piece of content and the warning raised when it is absent
#[derive(Debug)]
struct Expectation {
    pattern: Regex,
    message: String,
}

/// A set of content expectations for one kind of document
#[derive(Debug)]
pub struct HeuristicCheck {
    name: &'static str,
    matcher: FileMatcher,
    expectations: Vec<Expectation>,
}

impl HeuristicCheck {
    fn new(name: &'static str, matcher: FileMatcher) -> Self {
        Self { name, matcher, expectations: Vec::new() }
    }

    fn require(mut self, pattern: &str, message: impl Into<String>) -> RulecheckResult<Self> {
        self.expectations.push(Expectation { pattern: compile(pattern)?, message: message.into() });
        Ok(self)
    }

    /// Project root README: title, install, usage, contributing, license, badges
    pub fn readme(title_keywords: &[String]) -> RulecheckResult<Self> {
        let keywords: Vec<String> = title_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect();
        if keywords.is_empty() {
            return Err(RulecheckError::pattern("README title keywords must not be empty"));
        }

        let section = |name: &str| format!("README missing recommended section: {name}");

        Self::new("readme", FileMatcher::RootFile("README.md".to_string()))
            .require(&format!(r"(?im)^#[ \t]+.*({})", keywords.join("|")), section("Title"))?
            .require(r"(?i)(installation|install|quick[\s-]*start|getting started)", section("Installation"))?
            .require(r"(?i)(usage|examples?)", section("Usage"))?
            .require(r"(?i)contribut", section("Contributing"))?
            .require(r"(?i)licen[cs]e", section("License"))?
            .require(
                r"(!\[[^\]]*\]\([^)]*\))|(?i:<img\b)",
                "Consider adding badges or images to the README",
            )
    }

    /// CHANGELOG: conventions, version headings and an Unreleased section
    pub fn changelog() -> RulecheckResult<Self> {
        Self::new("changelog", FileMatcher::AnyFile("CHANGELOG.md".to_string()))
            .require(r"(?i)keep\s+a\s+changelog", "CHANGELOG should reference Keep a Changelog")?
            .require(
                r"(?i)(semantic\s+versioning|semver)",
                "CHANGELOG should reference Semantic Versioning",
            )?
            .require(
                r"(?m)^#+[ \t]*\[\d+\.\d+\.\d+\]",
                "CHANGELOG has no version headings (e.g. ## [1.0.0])",
            )?
            .require(r"(?i)unreleased", "CHANGELOG should include an Unreleased section")
    }

    /// CONTRIBUTING: setup, pull requests, issues, code of conduct
    pub fn contributing() -> RulecheckResult<Self> {
        let section = |name: &str| format!("CONTRIBUTING missing recommended section: {name}");

        Self::new("contributing", FileMatcher::AnyFile("CONTRIBUTING.md".to_string()))
            .require(
                r"(?i)(development\s+(setup|environment)|setting\s+up|local\s+setup|getting\s+started)",
                section("Development setup"),
            )?
            .require(r"(?i)(pull\s+request|\bPRs?\b|merge\s+request)", section("Pull request process"))?
            .require(r"(?i)(issues?|bug\s+reports?|reporting\s+bugs)", section("Issue reporting"))?
            .require(r"(?i)code\s+of\s+conduct", section("Code of conduct"))
    }

    /// The default set applied by the documentation validator
    pub fn defaults(title_keywords: &[String]) -> RulecheckResult<Vec<Self>> {
        Ok(vec![Self::readme(title_keywords)?, Self::changelog()?, Self::contributing()?])
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this check applies to `path` under `root`
    pub fn handles_file(&self, path: &Path, root: &Path) -> bool {
        self.matcher.matches(path, root)
    }

    /// Record a warning for every expectation the content does not meet
    pub fn check(&self, checks: &mut FileChecks, content: &str) {
        for expectation in &self.expectations {
            if !expectation.pattern.is_match(content) {
                checks.warning(self.name, expectation.message.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::findings::Severity;
    use std::path::PathBuf;

    fn keywords() -> Vec<String> {
        vec!["Cursor".to_string(), "Rules".to_string()]
    }

    fn run(check: &HeuristicCheck, content: &str) -> Vec<String> {
        let mut checks = FileChecks::new("doc.md");
        check.check(&mut checks, content);
        let findings = checks.into_findings();
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
        findings.into_iter().map(|f| f.message).collect()
    }

    #[test]
    fn test_complete_readme() {
        let readme = HeuristicCheck::readme(&keywords()).unwrap();
        let content = "# Cursor Rules Kit\n![build](https://img.shields.io/x.svg)\n\
                       ## Installation\n## Usage\n## Contributing\n## License\n";
        assert!(run(&readme, content).is_empty());
    }

    #[test]
    fn test_sparse_readme() {
        let readme = HeuristicCheck::readme(&keywords()).unwrap();
        let found = run(&readme, "## My Project\nSome words.");

        assert_eq!(
            found,
            [
                "README missing recommended section: Title",
                "README missing recommended section: Installation",
                "README missing recommended section: Usage",
                "README missing recommended section: Contributing",
                "README missing recommended section: License",
                "Consider adding badges or images to the README",
            ]
        );
    }

    #[test]
    fn test_readme_requires_keywords() {
        assert!(HeuristicCheck::readme(&[" ".to_string()]).is_err());
    }

    #[test]
    fn test_changelog() {
        let changelog = HeuristicCheck::changelog().unwrap();
        let good = "# Changelog\nBased on Keep a Changelog and Semantic Versioning.\n\
                    ## [Unreleased]\n## [1.2.0] - 2024-01-01\n";
        assert!(run(&changelog, good).is_empty());

        let found = run(&changelog, "# Changelog\n## 1.2.0\n");
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_contributing() {
        let contributing = HeuristicCheck::contributing().unwrap();
        let good = "## Development Setup\n## Pull Requests\n## Reporting Bugs\n\
                    Please follow our Code of Conduct.";
        assert!(run(&contributing, good).is_empty());

        let found = run(&contributing, "Thanks!");
        assert_eq!(found.len(), 4);
        assert_eq!(found[3], "CONTRIBUTING missing recommended section: Code of conduct");
    }

    #[test]
    fn test_file_matching() {
        let root = PathBuf::from("/repo");
        let readme = HeuristicCheck::readme(&keywords()).unwrap();
        let changelog = HeuristicCheck::changelog().unwrap();

        assert!(readme.handles_file(&root.join("README.md"), &root));
        assert!(!readme.handles_file(&root.join("examples/basic/README.md"), &root));
        assert!(changelog.handles_file(&root.join("docs/changelog.md"), &root));
        assert!(!changelog.handles_file(&root.join("CHANGES.md"), &root));
    }
}
