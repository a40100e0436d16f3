//! Report generation with multiple output formats
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - ValidationReport (domain) is converted to console text, JSON or GitHub annotations
//! - Each formatter encapsulates the rules for its specific output format
//! - Findings are rendered in discovery order in every format

use crate::domain::findings::{
    Finding, FileStatus, ReportKind, RulecheckError, RulecheckResult, Severity, ValidationReport,
};
use colored::{ColoredString, Colorize};
use std::io::Write;

/// Supported output formats for validation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable console report
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// GitHub Actions workflow commands
    GitHub,
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Whether the human report opens with the banner and per-file lines;
    /// off when the caller already streamed them during the run
    pub include_progress: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true, include_progress: true }
    }
}

/// Main report formatter that dispatches to specific formatters
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a validation report in the specified format
    pub fn format_report(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
    ) -> RulecheckResult<String> {
        match format {
            OutputFormat::Human => Ok(self.format_human(report)),
            OutputFormat::Json => self.format_json(report),
            OutputFormat::GitHub => Ok(self.format_github(report)),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
        mut writer: W,
    ) -> RulecheckResult<()> {
        let formatted = self.format_report(report, format)?;
        writer.write_all(formatted.as_bytes())?;
        Ok(())
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.options.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Opening line of a human report, printed before any file is checked
    pub fn format_banner(&self, kind: ReportKind) -> String {
        let banner = match kind {
            ReportKind::Rules => "🔍 Validating rule files...",
            ReportKind::Documentation => "📚 Validating documentation...",
        };
        format!("{}\n\n", self.paint(banner, |s| s.bold()))
    }

    /// Format report in human-readable format
    fn format_human(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        if self.options.include_progress {
            output.push_str(&self.format_banner(report.kind));
            for status in &report.files {
                output.push_str(&self.format_file_status(status));
            }
        }
        if !report.files.is_empty() {
            output.push('\n');
        }

        output.push_str(&self.format_summary(report));

        let errors: Vec<&Finding> = report.findings_by_severity(Severity::Error).collect();
        if !errors.is_empty() {
            output.push('\n');
            output.push_str(&self.paint("❌ Errors:", |s| s.red().bold()));
            output.push('\n');
            for finding in errors {
                output.push_str(&format!("  - {}\n", finding.format_display()));
            }
        }

        let warnings: Vec<&Finding> = report.findings_by_severity(Severity::Warning).collect();
        if !warnings.is_empty() {
            output.push('\n');
            output.push_str(&self.paint("⚠️  Warnings:", |s| s.yellow().bold()));
            output.push('\n');
            for finding in warnings {
                output.push_str(&format!("  - {}\n", finding.format_display()));
            }
        }

        output.push('\n');
        let subject = match report.kind {
            ReportKind::Rules => "rule files",
            ReportKind::Documentation => "documentation",
        };
        if report.is_success() {
            output.push_str(&self.paint(&format!("✅ All {subject} passed validation"), |s| s.green()));
        } else {
            output.push_str(&self.paint(&format!("❌ Validation of {subject} failed"), |s| s.red()));
        }
        output.push('\n');

        output
    }

    /// Progress line for one validated file
    pub fn format_file_status(&self, status: &FileStatus) -> String {
        if !status.is_valid() {
            format!(
                "{} {}\n",
                self.paint("❌", |s| s.red()),
                self.paint(&status.file, |s| s.red())
            )
        } else if status.warnings > 0 {
            format!(
                "{} {} ({} warning{})\n",
                self.paint("⚠️ ", |s| s.yellow()),
                status.file,
                status.warnings,
                if status.warnings == 1 { "" } else { "s" }
            )
        } else {
            format!("{} {}\n", self.paint("✅", |s| s.green()), status.file)
        }
    }

    /// Format the summary section
    fn format_summary(&self, report: &ValidationReport) -> String {
        let counts = &report.summary.findings_by_severity;
        let mut summary = String::new();

        summary.push_str(&self.paint("📊 Summary:", |s| s.bold()));
        summary.push('\n');
        summary.push_str(&format!("  Files validated: {}\n", report.summary.total_files));
        if let Some(links) = report.summary.links_checked {
            summary.push_str(&format!("  Links checked: {links}\n"));
        }

        let errors = format!("  Errors: {}", counts.error);
        let warnings = format!("  Warnings: {}", counts.warning);
        if counts.error > 0 {
            summary.push_str(&self.paint(&errors, |s| s.red()));
        } else {
            summary.push_str(&errors);
        }
        summary.push('\n');
        if counts.warning > 0 {
            summary.push_str(&self.paint(&warnings, |s| s.yellow()));
        } else {
            summary.push_str(&warnings);
        }
        summary.push('\n');

        summary
    }

    /// Format report in JSON format
    fn format_json(&self, report: &ValidationReport) -> RulecheckResult<String> {
        serde_json::to_string_pretty(report)
            .map_err(|e| RulecheckError::validation(format!("JSON serialization failed: {e}")))
    }

    /// Format report for GitHub Actions
    fn format_github(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        for finding in &report.findings {
            let line_part = finding.line.map(|line| format!(",line={line}")).unwrap_or_default();

            output.push_str(&format!(
                "::{} file={}{},title={}::{}\n",
                finding.severity.as_str(),
                finding.file,
                line_part,
                finding.check,
                finding.message
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as JsonValue;

    fn create_test_report() -> ValidationReport {
        let mut report = ValidationReport::new(ReportKind::Documentation);

        report.record_file("README.md", Vec::new());
        report.record_file(
            "docs/guide.md",
            vec![Finding::warning("too-short", "docs/guide.md", "File is very short")],
        );
        report.record_file(
            "docs/broken.md",
            vec![Finding::error("code-block", "docs/broken.md", "Unclosed code block")],
        );
        report.add_finding(
            Finding::error("broken-link", "docs/guide.md", "Broken link on line 3: gone.md")
                .at_line(3),
        );
        report.set_links_checked(4);

        report
    }

    fn plain() -> ReportFormatter {
        ReportFormatter::new(ReportOptions { use_colors: false, ..Default::default() })
    }

    #[test]
    fn test_human_format() {
        let report = create_test_report();
        let output = plain().format_report(&report, OutputFormat::Human).unwrap();

        assert!(output.starts_with("📚 Validating documentation..."));
        assert!(output.contains("✅ README.md\n"));
        assert!(output.contains("⚠️  docs/guide.md (1 warning)\n"));
        assert!(output.contains("❌ docs/broken.md\n"));
        assert!(output.contains("  Files validated: 3\n"));
        assert!(output.contains("  Links checked: 4\n"));
        assert!(output.contains("  Errors: 2\n"));
        assert!(output.contains("  Warnings: 1\n"));
        assert!(output.contains("  - docs/guide.md: Broken link on line 3: gone.md\n"));
        assert!(output.contains("❌ Validation of documentation failed"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_human_format_success() {
        let mut report = ValidationReport::new(ReportKind::Rules);
        report.record_file("core.mdc", Vec::new());

        let output = plain().format_report(&report, OutputFormat::Human).unwrap();
        assert!(output.contains("✅ All rule files passed validation"));
        assert!(!output.contains("Links checked"));
        assert!(!output.contains("Errors:\n"));
    }

    #[test]
    fn test_json_format() {
        let report = create_test_report();
        let output = plain().format_report(&report, OutputFormat::Json).unwrap();

        let json: JsonValue = serde_json::from_str(&output).unwrap();
        assert_eq!(json["kind"], "documentation");
        assert_eq!(json["findings"].as_array().unwrap().len(), 3);
        assert_eq!(json["findings"][2]["line"], 3);
        assert_eq!(json["findings"][2]["severity"], "error");
        assert_eq!(json["summary"]["total_files"], 3);
        assert_eq!(json["summary"]["links_checked"], 4);
    }

    #[test]
    fn test_github_format() {
        let report = create_test_report();
        let output = plain().format_report(&report, OutputFormat::GitHub).unwrap();

        assert!(output.contains("::warning file=docs/guide.md,title=too-short::File is very short\n"));
        assert!(output.contains(
            "::error file=docs/guide.md,line=3,title=broken-link::Broken link on line 3: gone.md\n"
        ));
    }

    #[test]
    fn test_streamed_progress_is_not_repeated() {
        let report = create_test_report();
        let formatter = ReportFormatter::new(ReportOptions { use_colors: false, include_progress: false });

        let mut output = formatter.format_banner(report.kind);
        for status in &report.files {
            output.push_str(&formatter.format_file_status(status));
        }
        output.push_str(&formatter.format_report(&report, OutputFormat::Human).unwrap());

        let full = plain().format_report(&report, OutputFormat::Human).unwrap();
        assert_eq!(output, full);
        assert_eq!(output.matches("docs/guide.md (1 warning)").count(), 1);
    }

    #[test]
    fn test_write_report() {
        let report = create_test_report();
        let mut buffer = Vec::new();
        plain().write_report(&report, OutputFormat::GitHub, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 3);
    }
}
