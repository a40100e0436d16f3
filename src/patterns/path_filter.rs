//! Path filtering and deterministic file discovery
//!
//! Architectural Principle: Service Layer - PathFilter owns the include/exclude decision
//! - Patterns follow .gitignore conventions: later patterns win, `!` re-includes
//! - Discovery walks are sorted by file name so repeated runs see the same order
//! - Callers receive paths; reading and checking files stays in the analyzers

use crate::domain::findings::{RulecheckError, RulecheckResult};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Manages path filtering using .gitignore-style patterns
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    patterns: Vec<FilterPattern>,
}

/// A single path filter pattern
#[derive(Debug, Clone)]
struct FilterPattern {
    /// The compiled glob
    pattern: glob::Pattern,
    /// Whether this is an include pattern (starts with !)
    is_include: bool,
    /// How the glob is applied to a path
    kind: PatternKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    /// `name/` - matches any directory component
    Directory,
    /// `/path` - matches the full relative path
    Anchored,
    /// `a/b*` - matches the full relative path
    Path,
    /// `*.md` - matches the file name only
    FileName,
}

impl PathFilter {
    /// Create a new path filter with the given patterns
    pub fn new(patterns: Vec<String>) -> RulecheckResult<Self> {
        let mut filter = Self::default();
        for pattern in patterns {
            filter.add_pattern(pattern)?;
        }
        Ok(filter)
    }

    /// Add a pattern to the filter
    pub fn add_pattern(&mut self, pattern: String) -> RulecheckResult<()> {
        let (is_include, pattern_str) = match pattern.strip_prefix('!') {
            Some(stripped) => (true, stripped.to_string()),
            None => (false, pattern),
        };

        let (kind, glob_str) = if let Some(dir) = pattern_str.strip_suffix('/') {
            (PatternKind::Directory, dir)
        } else if let Some(anchored) = pattern_str.strip_prefix('/') {
            (PatternKind::Anchored, anchored)
        } else if pattern_str.contains('/') {
            (PatternKind::Path, pattern_str.as_str())
        } else {
            (PatternKind::FileName, pattern_str.as_str())
        };

        let compiled = glob::Pattern::new(glob_str).map_err(|e| {
            RulecheckError::pattern(format!("Invalid pattern '{pattern_str}': {e}"))
        })?;

        self.patterns.push(FilterPattern { pattern: compiled, is_include, kind });
        Ok(())
    }

    /// Check whether a path relative to the validated root should be scanned
    pub fn should_include<P: AsRef<Path>>(&self, relative: P) -> bool {
        let relative = relative.as_ref();
        let mut include = true;

        for pattern in &self.patterns {
            if pattern.matches(relative) {
                include = pattern.is_include;
            }
        }

        include
    }

    /// Walk `dir` and return the accepted files, sorted, as absolute-or-joined paths.
    /// `max_depth` of `Some(1)` restricts the walk to the immediate children.
    pub fn find_files<F>(
        &self,
        root: &Path,
        dir: &Path,
        max_depth: Option<usize>,
        accept: F,
    ) -> Vec<PathBuf>
    where
        F: Fn(&Path) -> bool,
    {
        let mut walker = WalkDir::new(dir).min_depth(1).follow_links(false).sort_by_file_name();
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !accept(path) {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path);
            if self.should_include(relative) {
                files.push(path.to_path_buf());
            } else {
                tracing::debug!("Excluded by filter: {}", relative.display());
            }
        }

        files
    }

    /// Recursively find Markdown files under `dir`
    pub fn find_markdown_files(&self, root: &Path, dir: &Path) -> Vec<PathBuf> {
        self.find_files(root, dir, None, is_markdown)
    }
}

impl FilterPattern {
    fn matches(&self, path: &Path) -> bool {
        match self.kind {
            PatternKind::Directory => path
                .parent()
                .map(|parent| {
                    parent.components().any(|c| match c {
                        Component::Normal(name) => self.pattern.matches(&name.to_string_lossy()),
                        _ => false,
                    })
                })
                .unwrap_or(false),
            PatternKind::Anchored | PatternKind::Path => {
                self.pattern.matches(&display_path(path))
            }
            PatternKind::FileName => path
                .file_name()
                .map(|name| self.pattern.matches(&name.to_string_lossy()))
                .unwrap_or(false),
        }
    }
}

/// Whether a path has a Markdown extension
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

/// Render a relative path with `/` separators on every platform
pub fn display_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
