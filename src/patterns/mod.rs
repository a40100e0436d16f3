//! Text patterns shared by the validators
//!
//! Architectural Principle: Service Layer - Compiled regexes live behind small typed services
//! - GlobHeuristics flags rule glob patterns that are probably mistakes
//! - LinkExtractor pulls Markdown links out of a line and classifies their targets
//! - Patterns are compiled once per validator and reused for every file

pub mod path_filter;

use crate::domain::findings::{RulecheckError, RulecheckResult};
use regex::Regex;

pub use path_filter::{display_path, is_markdown, PathFilter};

/// Compile a regex, mapping failures into a pattern error
pub(crate) fn compile(pattern: &str) -> RulecheckResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| RulecheckError::pattern(format!("Invalid regex '{pattern}': {e}")))
}

/// Heuristics for suspicious `globs` values in rule frontmatter
#[derive(Debug)]
pub struct GlobHeuristics {
    suspicious: Vec<Regex>,
}

impl GlobHeuristics {
    pub fn new() -> RulecheckResult<Self> {
        let suspicious = [
            // three or more consecutive wildcards
            r"\*{3,}",
            // doubled path separators
            r"//",
            // embedded whitespace
            r"\s",
        ]
        .iter()
        .map(|p| compile(p))
        .collect::<RulecheckResult<Vec<_>>>()?;

        Ok(Self { suspicious })
    }

    /// Whether any suspicious pattern matches; the first hit short-circuits
    pub fn is_suspicious(&self, globs: &str) -> bool {
        self.suspicious.iter().any(|re| re.is_match(globs))
    }
}

/// How a link target should be treated during link resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// Absolute URL or other protocol (`https://`, `mailto:`); never checked
    External,
    /// Same-document anchor (`#section`); never checked
    Anchor,
    /// Relative (or root-anchored) file path with fragment removed
    Local(&'a str),
}

/// Extracts `[text](target)` links from Markdown lines
#[derive(Debug)]
pub struct LinkExtractor {
    link: Regex,
    scheme: Regex,
}

impl LinkExtractor {
    pub fn new() -> RulecheckResult<Self> {
        Ok(Self {
            link: compile(r"\[([^\]]*)\]\(([^)]+)\)")?,
            scheme: compile(r"^[A-Za-z][A-Za-z0-9+.\-]*://")?,
        })
    }

    /// All link targets on one line, in order of appearance
    pub fn extract<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.link
            .captures_iter(line)
            .filter_map(|caps| caps.get(2))
            .map(|m| m.as_str().trim())
            .filter(|target| !target.is_empty())
            .collect()
    }

    /// Classify a raw target as written between the parentheses
    pub fn classify<'a>(&self, raw: &'a str) -> LinkTarget<'a> {
        // `[a](path "Title")` carries an optional title after whitespace
        let url = raw.split_whitespace().next().unwrap_or("");

        if self.scheme.is_match(url) || url.contains(':') {
            return LinkTarget::External;
        }

        let path = url.split('#').next().unwrap_or("");
        if path.is_empty() {
            LinkTarget::Anchor
        } else {
            LinkTarget::Local(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("**/*.ts", false)]
    #[case("src/**/*.{ts,tsx}", false)]
    #[case("src/***/x.ts", true)]
    #[case("src//lib/*.rs", true)]
    #[case("src/*.ts, lib/*.ts", true)]
    #[case("*.md\t", true)]
    fn test_glob_heuristics(#[case] globs: &str, #[case] expected: bool) {
        let heuristics = GlobHeuristics::new().unwrap();
        assert_eq!(heuristics.is_suspicious(globs), expected, "{globs}");
    }

    #[test]
    fn test_extract_links_in_order() {
        let extractor = LinkExtractor::new().unwrap();
        let line = "See [guide](docs/guide.md) and [site](https://example.com) or [](empty).";

        assert_eq!(extractor.extract(line), ["docs/guide.md", "https://example.com", "empty"]);
        assert!(extractor.extract("no links here").is_empty());
    }

    #[rstest]
    #[case("https://example.com/page", LinkTarget::External)]
    #[case("http://example.com", LinkTarget::External)]
    #[case("ftp://files.example.com", LinkTarget::External)]
    #[case("mailto:team@example.com", LinkTarget::External)]
    #[case("#installation", LinkTarget::Anchor)]
    #[case("docs/guide.md#setup", LinkTarget::Local("docs/guide.md"))]
    #[case("../README.md \"Project readme\"", LinkTarget::Local("../README.md"))]
    #[case("/docs/workflow.md", LinkTarget::Local("/docs/workflow.md"))]
    fn test_classify(#[case] raw: &str, #[case] expected: LinkTarget<'static>) {
        let extractor = LinkExtractor::new().unwrap();
        assert_eq!(extractor.classify(raw), expected);
    }
}
