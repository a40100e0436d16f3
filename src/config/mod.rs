//! Configuration loading and management for rulecheck
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to clean domain objects
//! - Defaults describe the conventional project layout, so the file is optional
//! - Every section and field may be omitted

use crate::domain::findings::{RulecheckError, RulecheckResult};
use crate::patterns::PathFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed in the validated root when no explicit config is given
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["rulecheck.yaml", "rulecheck.yml", ".rulecheck.yaml"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulecheckConfig {
    /// Configuration format version
    pub version: String,
    /// Rule file validation settings
    pub rules: RulesConfig,
    /// Documentation validation settings
    pub docs: DocsConfig,
}

/// Settings for the rule file validator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Directory holding rule files, relative to the validated root
    pub directory: PathBuf,
    /// Rule file extension, including the leading dot
    pub extension: String,
    /// Whether to descend into subdirectories of `directory`
    pub recursive: bool,
    /// Descriptions longer than this many characters are reported as too verbose
    pub max_description_length: usize,
    /// Bodies shorter than this many characters are reported as too sparse
    pub min_content_length: usize,
}

/// Settings for the documentation validator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Top-level files that must exist
    pub core_files: Vec<String>,
    /// Documentation directory, scanned recursively for Markdown
    pub docs_dir: PathBuf,
    /// Paths (relative to the root) whose absence is a warning
    pub recommended_docs: Vec<String>,
    /// Directory whose immediate subdirectories are examples
    pub examples_dir: PathBuf,
    /// README file name expected in every example
    pub example_readme: String,
    /// Markdown files shorter than this many characters are reported as too sparse
    pub min_content_length: usize,
    /// Words one of which the README top-level heading should mention
    pub readme_title_keywords: Vec<String>,
    /// gitignore-style patterns excluded from the docs scan
    pub exclude: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".cursor").join("rules"),
            extension: ".mdc".to_string(),
            recursive: false,
            max_description_length: 200,
            min_content_length: 100,
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            core_files: ["README.md", "CHANGELOG.md", "CONTRIBUTING.md", "LICENSE"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            docs_dir: PathBuf::from("docs"),
            recommended_docs: [
                "docs/getting-started.md",
                "docs/workflow.md",
                "docs/architecture.md",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            examples_dir: PathBuf::from("examples"),
            example_readme: "README.md".to_string(),
            min_content_length: 100,
            readme_title_keywords: ["Cursor", "Rules", "Framework", "AI"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude: vec!["**/node_modules/**".to_string(), "**/.git/**".to_string()],
        }
    }
}

impl Default for RulecheckConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            rules: RulesConfig::default(),
            docs: DocsConfig::default(),
        }
    }
}

impl RulecheckConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RulecheckResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            RulecheckError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            RulecheckError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> RulecheckResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| RulecheckError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a run: an explicit file, else the first
    /// default file found in `root`, else built-in defaults
    pub fn discover(root: &Path, explicit: Option<&Path>) -> RulecheckResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match Self::default_file(root) {
            Some(path) => {
                tracing::debug!("Using configuration {}", path.display());
                Self::load_from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// First of the default configuration file names present in `root`
    pub fn default_file(root: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| root.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> RulecheckResult<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            return Err(RulecheckError::config(format!(
                "Unsupported configuration version: {}. Supported versions: 1.0",
                self.version
            )));
        }

        if self.rules.extension.trim().is_empty() {
            return Err(RulecheckError::config("rules.extension must not be empty"));
        }

        if self.rules.max_description_length == 0 {
            return Err(RulecheckError::config(
                "rules.max_description_length must be greater than zero",
            ));
        }

        if self.docs.readme_title_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(RulecheckError::config(
                "docs.readme_title_keywords must contain at least one keyword",
            ));
        }

        PathFilter::new(self.docs.exclude.clone())
            .map_err(|e| RulecheckError::config(format!("Invalid docs.exclude pattern: {e}")))?;

        Ok(())
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> RulecheckResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RulecheckError::config(format!("Failed to serialize config: {e}")))
    }
}
