//! Validators and the Markdown checks they share
//!
//! CDD Principle: Domain Services - Validators orchestrate discovery, reading and checking
//! - RuleValidator checks rule files: frontmatter metadata plus Markdown body
//! - DocumentationValidator checks project docs, example READMEs and relative links
//! - Both collect findings per file and hand them to a ValidationReport

pub mod docs;
pub mod heuristics;
pub mod rules;

pub use docs::DocumentationValidator;
pub use heuristics::HeuristicCheck;
pub use rules::RuleValidator;

use crate::domain::findings::{Finding, Severity};

/// Line consisting only of the frontmatter delimiter
const FRONTMATTER_DELIMITER: &str = "---";

/// Line prefix that opens or closes a fenced code block
const CODE_FENCE: &str = "```";

/// Findings collected for a single file
#[derive(Debug)]
pub struct FileChecks {
    file: String,
    findings: Vec<Finding>,
}

impl FileChecks {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into(), findings: Vec::new() }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn error(&mut self, check: &str, message: impl Into<String>) {
        self.findings.push(Finding::error(check, self.file.clone(), message));
    }

    pub fn warning(&mut self, check: &str, message: impl Into<String>) {
        self.findings.push(Finding::warning(check, self.file.clone(), message));
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

/// Parameters of the shared Markdown structure check
#[derive(Debug, Clone, Copy)]
pub struct MarkdownOptions {
    /// Noun used in messages ("Rule content", "File")
    pub subject: &'static str,
    /// Content shorter than this is reported as too sparse
    pub min_content_length: usize,
}

/// Heading, length and code fence checks shared by rule bodies and docs.
///
/// `first_line` is the 1-based line number of the first line of `content`
/// within its file, so reported line numbers point into the whole file.
pub fn check_markdown_structure(
    checks: &mut FileChecks,
    content: &str,
    first_line: usize,
    options: MarkdownOptions,
) {
    if !content.contains('#') {
        checks.warning(
            "structure",
            format!("{} should include at least one heading (#)", options.subject),
        );
    }

    if content.trim().chars().count() < options.min_content_length {
        checks.warning(
            "too-short",
            format!(
                "{} is very short (less than {} characters)",
                options.subject, options.min_content_length
            ),
        );
    }

    let mut in_code_block = false;
    for (index, line) in content.lines().enumerate() {
        if line.trim().starts_with(CODE_FENCE) {
            in_code_block = !in_code_block;
            continue;
        }

        if !in_code_block && line.matches('`').count() % 2 == 1 {
            let line_number = first_line + index;
            checks.push(
                Finding::warning(
                    "backticks",
                    checks.file().to_string(),
                    format!("Line {line_number}: Unbalanced backticks"),
                )
                .at_line(line_number),
            );
        }
    }

    if in_code_block {
        checks.error("code-block", "Unclosed code block");
    }
}

/// A rule file split at its frontmatter delimiters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    /// Text between the first and second delimiter lines
    pub yaml: String,
    /// Text after the second delimiter line
    pub body: String,
    /// 1-based line number of the first body line
    pub body_first_line: usize,
}

/// Split content at the first two `---` lines; `None` when fewer than two exist
pub fn split_frontmatter(content: &str) -> Option<Frontmatter> {
    let lines: Vec<&str> = content.lines().collect();
    let mut delimiters = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim_end() == FRONTMATTER_DELIMITER)
        .map(|(index, _)| index);

    let open = delimiters.next()?;
    let close = delimiters.next()?;

    Some(Frontmatter {
        yaml: lines[open + 1..close].join("\n"),
        body: lines[close + 1..].join("\n"),
        body_first_line: close + 2,
    })
}
