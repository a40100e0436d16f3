//! Rule file validation: frontmatter metadata and Markdown body
//!
//! Code Quality Principle: Specialized Analysis Services - one validator per artifact type
//! - Precondition failures (unreadable, no frontmatter, bad YAML) stop checks for that file only
//! - Field checks are independent: every missing or mistyped field is its own finding
//! - Body checks reuse the shared Markdown structure scan

use crate::analyzer::{check_markdown_structure, split_frontmatter, FileChecks, MarkdownOptions};
use crate::config::RulesConfig;
use crate::domain::findings::{FileStatus, Finding, ReportKind, RulecheckResult, ValidationReport};
use crate::patterns::{display_path, GlobHeuristics, PathFilter};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Metadata keys every rule file must define
pub const REQUIRED_FIELDS: [&str; 3] = ["description", "globs", "alwaysApply"];

/// Validates every rule file in the configured directory
#[derive(Debug)]
pub struct RuleValidator {
    config: RulesConfig,
    globs: GlobHeuristics,
    path_filter: PathFilter,
}

impl RuleValidator {
    /// Create a validator with the given settings
    pub fn new(config: RulesConfig) -> RulecheckResult<Self> {
        Ok(Self { config, globs: GlobHeuristics::new()?, path_filter: PathFilter::default() })
    }

    /// Create a validator with default settings
    pub fn with_defaults() -> RulecheckResult<Self> {
        Self::new(RulesConfig::default())
    }

    /// Validate the rule directory under `root`.
    ///
    /// A missing directory is not an error: the report simply has no files.
    pub fn validate(&self, root: &Path) -> RulecheckResult<ValidationReport> {
        self.validate_with_progress(root, |_| {})
    }

    /// Like [`validate`](Self::validate), calling `on_file` as soon as each file is checked
    pub fn validate_with_progress<F>(
        &self,
        root: &Path,
        mut on_file: F,
    ) -> RulecheckResult<ValidationReport>
    where
        F: FnMut(&FileStatus),
    {
        let start_time = Instant::now();
        let mut report = ValidationReport::new(ReportKind::Rules);
        let directory = root.join(&self.config.directory);

        if !directory.is_dir() {
            tracing::warn!("Rules directory not found: {}", directory.display());
            report.set_execution_time(start_time.elapsed().as_millis() as u64);
            return Ok(report);
        }

        let max_depth = if self.config.recursive { None } else { Some(1) };
        let files = self.path_filter.find_files(root, &directory, max_depth, |path| {
            path.file_name()
                .map(|name| name.to_string_lossy().ends_with(&self.config.extension))
                .unwrap_or(false)
        });

        for path in files {
            let name = display_path(path.strip_prefix(&directory).unwrap_or(&path));
            let findings = self.validate_file(&path, &name);
            let status = report.record_file(name, findings);
            tracing::debug!("Validated rule {} (valid: {})", status.file, status.is_valid());
            on_file(status);
        }

        report.set_execution_time(start_time.elapsed().as_millis() as u64);
        Ok(report)
    }

    /// Read and validate one rule file; `name` names it in findings
    pub fn validate_file(&self, path: &Path, name: &str) -> Vec<Finding> {
        match fs::read_to_string(path) {
            Ok(content) => self.validate_content(name, &content),
            Err(e) => vec![Finding::error("read", name, format!("Failed to read file: {e}"))],
        }
    }

    /// Validate rule file content already in memory
    pub fn validate_content(&self, name: &str, content: &str) -> Vec<Finding> {
        let mut checks = FileChecks::new(name);

        let Some(parts) = split_frontmatter(content) else {
            checks.error("frontmatter", "Missing YAML frontmatter");
            return checks.into_findings();
        };

        let metadata = match serde_yaml::from_str::<Value>(&parts.yaml) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(Value::Null) => Mapping::new(),
            Ok(_) => {
                checks.error("frontmatter", "Frontmatter must be a YAML mapping");
                return checks.into_findings();
            }
            Err(e) => {
                checks.error("frontmatter", format!("Invalid YAML: {e}"));
                return checks.into_findings();
            }
        };

        self.check_metadata(&mut checks, &metadata);
        self.check_body(&mut checks, &parts.body, parts.body_first_line);

        checks.into_findings()
    }

    fn check_metadata(&self, checks: &mut FileChecks, metadata: &Mapping) {
        for field in REQUIRED_FIELDS {
            if !metadata.contains_key(field) {
                checks.error("required-field", format!("Missing required field: {field}"));
            }
        }

        match metadata.get("description") {
            None => {}
            Some(Value::String(description)) => {
                let length = description.chars().count();
                if length > self.config.max_description_length {
                    checks.warning(
                        "description-length",
                        format!(
                            "description is very long ({length} characters); keep it under {}",
                            self.config.max_description_length
                        ),
                    );
                }
            }
            Some(_) => checks.error("field-type", "description must be a string"),
        }

        match metadata.get("globs") {
            None => {}
            Some(Value::String(globs)) => {
                if self.globs.is_suspicious(globs) {
                    checks.warning("glob-pattern", format!("Potentially problematic glob pattern: {globs}"));
                }
            }
            Some(_) => checks.error("field-type", "globs must be a string"),
        }

        match metadata.get("alwaysApply") {
            None | Some(Value::Bool(_)) => {}
            Some(_) => checks.error("field-type", "alwaysApply must be a boolean (true/false)"),
        }
    }

    fn check_body(&self, checks: &mut FileChecks, body: &str, first_line: usize) {
        if body.trim().is_empty() {
            checks.error("empty-content", "Rule content cannot be empty");
            return;
        }

        check_markdown_structure(
            checks,
            body,
            first_line,
            MarkdownOptions {
                subject: "Rule content",
                min_content_length: self.config.min_content_length,
            },
        );
    }
}
