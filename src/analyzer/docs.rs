//! Documentation validation: core files, docs tree, examples and links
//!
//! Code Quality Principle: Specialized Analysis Services - four ordered, independent passes
//! - Core files, docs directory and examples each record findings without stopping the run
//! - Every Markdown link is recorded while scanning and resolved in a final pass
//! - Relative targets resolve against the referencing file; external targets are skipped

use crate::analyzer::{check_markdown_structure, FileChecks, HeuristicCheck, MarkdownOptions};
use crate::config::DocsConfig;
use crate::domain::findings::{
    FileStatus, Finding, LinkReference, ReportKind, RulecheckResult, ValidationReport,
};
use crate::patterns::{display_path, is_markdown, LinkExtractor, LinkTarget, PathFilter};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Validates project documentation under a root directory
#[derive(Debug)]
pub struct DocumentationValidator {
    config: DocsConfig,
    path_filter: PathFilter,
    links: LinkExtractor,
    heuristics: Vec<HeuristicCheck>,
}

/// Mutable state of one documentation run
struct DocsRun<'a> {
    report: ValidationReport,
    links: Vec<LinkReference>,
    seen_links: HashSet<LinkReference>,
    on_file: &'a mut dyn FnMut(&FileStatus),
}

impl<'a> DocsRun<'a> {
    fn new(on_file: &'a mut dyn FnMut(&FileStatus)) -> Self {
        Self {
            report: ValidationReport::new(ReportKind::Documentation),
            links: Vec::new(),
            seen_links: HashSet::new(),
            on_file,
        }
    }

    fn record_link(&mut self, link: LinkReference) {
        if self.seen_links.insert(link.clone()) {
            self.links.push(link);
        }
    }
}

impl DocumentationValidator {
    /// Create a validator with the given settings
    pub fn new(config: DocsConfig) -> RulecheckResult<Self> {
        let path_filter = PathFilter::new(config.exclude.clone())?;
        let heuristics = HeuristicCheck::defaults(&config.readme_title_keywords)?;

        Ok(Self { config, path_filter, links: LinkExtractor::new()?, heuristics })
    }

    /// Create a validator with default settings
    pub fn with_defaults() -> RulecheckResult<Self> {
        Self::new(DocsConfig::default())
    }

    /// Run all passes against `root`
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
        let mut run = DocsRun::new(&mut on_file);

        self.check_core_files(root, &mut run);
        self.check_docs_directory(root, &mut run);
        self.check_examples(root, &mut run);
        self.resolve_links(root, &mut run);

        let mut report = run.report;
        report.set_execution_time(start_time.elapsed().as_millis() as u64);
        Ok(report)
    }

    fn check_core_files(&self, root: &Path, run: &mut DocsRun) {
        for name in &self.config.core_files {
            let path = root.join(name);
            if path.is_file() {
                self.validate_file(root, &path, run);
            } else {
                run.report.add_finding(Finding::error(
                    "required-file",
                    name.as_str(),
                    format!("Missing required file: {name}"),
                ));
            }
        }
    }

    fn check_docs_directory(&self, root: &Path, run: &mut DocsRun) {
        let docs_dir = root.join(&self.config.docs_dir);
        let docs_display = display_path(&self.config.docs_dir);

        if !docs_dir.is_dir() {
            run.report.add_finding(Finding::error(
                "docs-directory",
                docs_display.as_str(),
                format!("Documentation directory not found: {docs_display}"),
            ));
            return;
        }

        for path in self.path_filter.find_markdown_files(root, &docs_dir) {
            self.validate_file(root, &path, run);
        }

        for recommended in &self.config.recommended_docs {
            if !root.join(recommended).exists() {
                run.report.add_finding(Finding::warning(
                    "recommended-doc",
                    recommended.as_str(),
                    format!("Recommended documentation missing: {recommended}"),
                ));
            }
        }
    }

    fn check_examples(&self, root: &Path, run: &mut DocsRun) {
        let examples_dir = root.join(&self.config.examples_dir);
        let examples_display = display_path(&self.config.examples_dir);

        if !examples_dir.is_dir() {
            run.report.add_finding(Finding::warning(
                "examples-directory",
                examples_display.as_str(),
                format!("Examples directory not found: {examples_display}"),
            ));
            return;
        }

        let mut examples: Vec<PathBuf> = match fs::read_dir(&examples_dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", examples_dir.display(), e);
                Vec::new()
            }
        };
        examples.sort();

        for example in examples {
            let readme = example.join(&self.config.example_readme);
            if readme.is_file() {
                self.validate_file(root, &readme, run);
            } else {
                let example_display = relative_display(root, &example);
                run.report.add_finding(Finding::warning(
                    "example-readme",
                    example_display.as_str(),
                    format!("Example missing {}: {example_display}", self.config.example_readme),
                ));
            }
        }
    }

    /// Generic per-file validation used by every pass
    fn validate_file(&self, root: &Path, path: &Path, run: &mut DocsRun) {
        let name = relative_display(root, path);
        tracing::debug!("Validating {}", name);

        let findings = match fs::read_to_string(path) {
            Ok(content) => self.check_content(root, path, &name, &content, run),
            Err(e) => vec![Finding::error("read", name.as_str(), format!("Failed to read file: {e}"))],
        };

        let status = run.report.record_file(name, findings);
        (run.on_file)(status);
    }

    fn check_content(
        &self,
        root: &Path,
        path: &Path,
        name: &str,
        content: &str,
        run: &mut DocsRun,
    ) -> Vec<Finding> {
        let mut checks = FileChecks::new(name);

        if content.trim().is_empty() {
            checks.error("empty-file", "File is empty");
            return checks.into_findings();
        }

        if is_markdown(path) {
            check_markdown_structure(
                &mut checks,
                content,
                1,
                MarkdownOptions { subject: "File", min_content_length: self.config.min_content_length },
            );

            for (index, line) in content.lines().enumerate() {
                for target in self.links.extract(line) {
                    run.record_link(LinkReference {
                        source_path: path.to_path_buf(),
                        source_file: name.to_string(),
                        target_url: target.to_string(),
                        line_number: index + 1,
                    });
                }
            }
        }

        for heuristic in self.heuristics.iter().filter(|h| h.handles_file(path, root)) {
            tracing::debug!("Applying {} heuristics to {}", heuristic.name(), name);
            heuristic.check(&mut checks, content);
        }

        checks.into_findings()
    }

    fn resolve_links(&self, root: &Path, run: &mut DocsRun) {
        for link in &run.links {
            let target = match self.links.classify(&link.target_url) {
                LinkTarget::Local(target) => target,
                LinkTarget::External | LinkTarget::Anchor => continue,
            };

            let resolved = match target.strip_prefix('/') {
                Some(from_root) => root.join(from_root),
                None => link
                    .source_path
                    .parent()
                    .map(|dir| dir.join(target))
                    .unwrap_or_else(|| root.join(target)),
            };

            if !resolved.exists() {
                run.report.add_finding(
                    Finding::error(
                        "broken-link",
                        link.source_file.as_str(),
                        format!("Broken link on line {}: {}", link.line_number, link.target_url),
                    )
                    .at_line(link.line_number),
                );
            }
        }

        run.report.set_links_checked(run.links.len());
    }
}

fn relative_display(root: &Path, path: &Path) -> String {
    display_path(path.strip_prefix(root).unwrap_or(path))
}
