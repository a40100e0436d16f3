//! Core domain models for validation findings and run reports
//!
//! Architecture: Rich Domain Models - Findings are immutable records produced by checks
//! - A Finding ties one message and one severity to one file
//! - ValidationReport acts as the aggregate root: append-only, discovery ordered
//! - Success of a run is derived from the report, never stored separately

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity levels for validation findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Style and content suggestions that never fail a run
    Warning,
    /// Structural problems that fail the run
    Error,
}

impl Severity {
    /// Whether this severity level should cause validation to fail
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single validation result tied to a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Identifier of the check that produced this finding
    pub check: String,
    /// Severity level of this finding
    pub severity: Severity,
    /// File name or path relative to the validated directory
    pub file: String,
    /// Line number (1-indexed) when the finding points at a line
    pub line: Option<usize>,
    /// Human-readable description
    pub message: String,
}

impl Finding {
    /// Create a new finding
    pub fn new(
        check: impl Into<String>,
        severity: Severity,
        file: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check: check.into(),
            severity,
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Create an error finding
    pub fn error(check: impl Into<String>, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check, Severity::Error, file, message)
    }

    /// Create a warning finding
    pub fn warning(
        check: impl Into<String>,
        file: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(check, Severity::Warning, file, message)
    }

    /// Attach a line number
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Whether this finding fails the run
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }

    /// Format finding for display
    pub fn format_display(&self) -> String {
        format!("{}: {}", self.file, self.message)
    }
}

/// A Markdown link recorded during the documentation scan
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkReference {
    /// Path of the file that contains the link, as read from disk
    pub source_path: PathBuf,
    /// Display form of the source file used in findings
    pub source_file: String,
    /// Raw link target as written between the parentheses
    pub target_url: String,
    /// Line number (1-indexed) of the link
    pub line_number: usize,
}

/// Per-file outcome used for progress lines and validity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStatus {
    /// File name or relative path
    pub file: String,
    /// Error findings recorded for this file
    pub errors: usize,
    /// Warning findings recorded for this file
    pub warnings: usize,
}

impl FileStatus {
    /// A file is valid when no error was recorded for it
    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }
}

/// Count of findings by severity level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingCounts {
    pub error: usize,
    pub warning: usize,
}

impl FindingCounts {
    /// Total number of findings across all severities
    pub fn total(&self) -> usize {
        self.error + self.warning
    }

    /// Whether there are any blocking findings
    pub fn has_blocking(&self) -> bool {
        self.error > 0
    }

    /// Add a finding to the counts
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
        }
    }
}

/// Summary statistics for a validation report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Total number of files validated
    pub total_files: usize,
    /// Number of findings by severity level
    pub findings_by_severity: FindingCounts,
    /// Number of Markdown links recorded (documentation runs only)
    pub links_checked: Option<usize>,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
}

/// Which validator produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Rules,
    Documentation,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Documentation => "documentation",
        }
    }
}

/// Complete report of a single validation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Validator that produced this report
    pub kind: ReportKind,
    /// Files validated, in processing order
    pub files: Vec<FileStatus>,
    /// All findings, in discovery order
    pub findings: Vec<Finding>,
    /// Summary statistics
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            files: Vec::new(),
            findings: Vec::new(),
            summary: ValidationSummary::default(),
        }
    }

    /// Record a validated file together with the findings it produced
    pub fn record_file(&mut self, file: impl Into<String>, findings: Vec<Finding>) -> &FileStatus {
        let mut status = FileStatus { file: file.into(), errors: 0, warnings: 0 };

        for finding in findings {
            match finding.severity {
                Severity::Error => status.errors += 1,
                Severity::Warning => status.warnings += 1,
            }
            self.add_finding(finding);
        }

        self.files.push(status);
        self.summary.total_files = self.files.len();
        &self.files[self.files.len() - 1]
    }

    /// Add a finding that is not tied to a validated file (missing artifacts, links)
    pub fn add_finding(&mut self, finding: Finding) {
        self.summary.findings_by_severity.add(finding.severity);
        self.findings.push(finding);
    }

    /// Whether the report contains any findings
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Whether the report contains blocking findings (errors)
    pub fn has_errors(&self) -> bool {
        self.summary.findings_by_severity.has_blocking()
    }

    /// A run succeeds when no error was recorded; warnings never count
    pub fn is_success(&self) -> bool {
        !self.has_errors()
    }

    /// Get findings of a specific severity
    pub fn findings_by_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// Findings recorded for one file
    pub fn findings_for_file<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a Finding> {
        self.findings.iter().filter(move |f| f.file == file)
    }

    /// Set the number of links recorded during a documentation run
    pub fn set_links_checked(&mut self, count: usize) {
        self.summary.links_checked = Some(count);
    }

    /// Set the execution time
    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.summary.execution_time_ms = duration_ms;
    }
}

/// Error types that can occur while running a validator
#[derive(Debug, thiserror::Error)]
pub enum RulecheckError {
    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem access failed outside of per-file checks
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Pattern compilation failed
    #[error("Pattern error: {message}")]
    Pattern { message: String },

    /// Report could not be produced
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl RulecheckError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a pattern error
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern { message: message.into() }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }
}

/// Result type for rulecheck operations
pub type RulecheckResult<T> = Result<T, RulecheckError>;
