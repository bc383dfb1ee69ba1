//! The ordered patterns contributed by one directory's ignore file.

use crate::path::pattern::CompiledPattern;
use crate::path::IGNORE_FILE_NAME;
use std::path::{Path, PathBuf};

/// Compiled patterns from a single ignore file, in source order. Order is
/// significant: later lines override earlier ones within the same set.
///
/// A rule set is built once per directory and immutable afterwards.
#[derive(Debug, Clone)]
pub struct RuleSet {
    declaring_directory: PathBuf,
    /// Path of the declaring directory relative to the base directory, using
    /// `/` separators; empty for the base directory itself.
    prefix: String,
    patterns: Vec<CompiledPattern>,
}

impl RuleSet {
    /// Parse ignore-file content declared in `declaring_directory`.
    pub fn parse(declaring_directory: PathBuf, prefix: String, content: &str) -> Self {
        let patterns = content.lines().filter_map(CompiledPattern::compile).collect();
        Self {
            declaring_directory,
            prefix,
            patterns,
        }
    }

    /// Load the ignore file of `declaring_directory`, if any. A missing or
    /// unreadable file contributes an empty set: ignore matching is advisory
    /// filtering, so availability wins over strictness here.
    pub fn load(declaring_directory: &Path, base_directory: &Path) -> Self {
        let prefix = declaring_directory
            .strip_prefix(base_directory)
            .map(relative_prefix)
            .unwrap_or_default();

        let ignore_path = declaring_directory.join(IGNORE_FILE_NAME);
        let content = match std::fs::read_to_string(&ignore_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                tracing::debug!(
                    path = %ignore_path.display(),
                    error = %e,
                    "Failed to read ignore file, contributing no rules"
                );
                String::new()
            }
        };

        Self::parse(declaring_directory.to_path_buf(), prefix, &content)
    }

    pub fn declaring_directory(&self) -> &Path {
        &self.declaring_directory
    }

    /// Declaring directory relative to the base, `/`-separated.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn relative_prefix(relative: &Path) -> String {
    let mut prefix = String::new();
    for component in relative.components() {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(&component.as_os_str().to_string_lossy());
    }
    prefix
}
