//! Rulecheck - Structural validation for AI-IDE rule files and project documentation
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure domain logic separated from infrastructure concerns
//! - Validators own discovery and checking; the report owns aggregation
//! - Formatting is a separate concern; progress is handed to the caller per file

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod patterns;
pub mod report;

// Re-export main types for convenient access
pub use domain::findings::{
    FileStatus, Finding, FindingCounts, ReportKind, RulecheckError, RulecheckResult, Severity,
    ValidationReport, ValidationSummary,
};

pub use config::{DocsConfig, RulecheckConfig, RulesConfig};

pub use analyzer::{DocumentationValidator, RuleValidator};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

use std::path::Path;

/// High-level entry point bundling both validators
#[derive(Debug)]
pub struct RulecheckValidator {
    rules: RuleValidator,
    docs: DocumentationValidator,
}

impl RulecheckValidator {
    /// Create a validator from a loaded configuration
    pub fn new_with_config(config: RulecheckConfig) -> RulecheckResult<Self> {
        config.validate()?;

        Ok(Self {
            rules: RuleValidator::new(config.rules)?,
            docs: DocumentationValidator::new(config.docs)?,
        })
    }

    /// Create a validator for `root`, using `explicit` or a config file found there
    pub fn discover(root: &Path, explicit: Option<&Path>) -> RulecheckResult<Self> {
        Self::new_with_config(RulecheckConfig::discover(root, explicit)?)
    }

    /// Validate the rule files under `root`, reporting each file as it is checked
    pub fn validate_rules<F>(&self, root: &Path, on_file: F) -> RulecheckResult<ValidationReport>
    where
        F: FnMut(&FileStatus),
    {
        self.rules.validate_with_progress(root, on_file)
    }

    /// Validate the documentation under `root`, reporting each file as it is checked
    pub fn validate_docs<F>(&self, root: &Path, on_file: F) -> RulecheckResult<ValidationReport>
    where
        F: FnMut(&FileStatus),
    {
        self.docs.validate_with_progress(root, on_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RULE: &str = "---\ndescription: Core conventions\nglobs: \"**/*.rs\"\nalwaysApply: true\n---\n\
                        # Core conventions\n\nKeep modules small, name things by what they do, \
                        and prefer explicit error propagation over panics.\n";

    fn defaults(root: &Path) -> RulecheckValidator {
        RulecheckValidator::discover(root, None).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = RulecheckConfig::default();
        config.rules.extension = String::new();
        assert!(RulecheckValidator::new_with_config(config).is_err());
    }

    #[test]
    fn test_validate_rules_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let rules_dir = temp_dir.path().join(".cursor/rules");
        fs::create_dir_all(&rules_dir).unwrap();
        fs::write(rules_dir.join("core.mdc"), RULE).unwrap();
        fs::write(rules_dir.join("notes.txt"), "not a rule").unwrap();

        let mut progress = Vec::new();
        let report = defaults(temp_dir.path())
            .validate_rules(temp_dir.path(), |status| progress.push(status.file.clone()))
            .unwrap();

        assert_eq!(progress, ["core.mdc"]);
        assert_eq!(report.summary.total_files, 1);
        assert!(!report.has_findings());
        assert!(report.is_success());
    }

    #[test]
    fn test_discovered_config_changes_rule_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("rulecheck.yaml"), "rules:\n  directory: rules\n").unwrap();
        fs::create_dir_all(root.join("rules")).unwrap();
        fs::write(root.join("rules/bad.mdc"), "# no frontmatter\n").unwrap();

        let report = defaults(root).validate_rules(root, |_| {}).unwrap();

        assert_eq!(report.summary.total_files, 1);
        assert!(report.has_errors());
        assert_eq!(report.findings[0].message, "Missing YAML frontmatter");
    }

    #[test]
    fn test_warnings_only_docs_run_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for name in ["README.md", "CHANGELOG.md", "CONTRIBUTING.md", "LICENSE"] {
            fs::write(root.join(name), "short").unwrap();
        }
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/getting-started.md"), "short").unwrap();

        let report = defaults(root).validate_docs(root, |_| {}).unwrap();

        assert_eq!(report.summary.findings_by_severity.error, 0);
        assert!(report.summary.findings_by_severity.warning > 0);
        assert!(report.is_success());
    }

    #[test]
    fn test_empty_project_fails_docs_run() {
        let temp_dir = TempDir::new().unwrap();
        let report = defaults(temp_dir.path()).validate_docs(temp_dir.path(), |_| {}).unwrap();

        let formatter = ReportFormatter::new(ReportOptions { use_colors: false, ..Default::default() });
        let output = formatter.format_report(&report, OutputFormat::GitHub).unwrap();

        assert!(output.contains("::error file=README.md,title=required-file::Missing required file: README.md"));
        assert!(output.contains("Documentation directory not found: docs"));
        assert!(!report.is_success());
    }
}
