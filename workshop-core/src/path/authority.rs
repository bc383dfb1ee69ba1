//! The facade every file operation goes through.
//!
//! Owns the base directory, validates that resolved paths stay inside it,
//! and answers ignore queries by combining the hierarchy walker with the
//! match engine. Rule sets are cached per directory for the lifetime of the
//! authority; the session is assumed to run against a static tree, so cache
//! entries are never invalidated (known limitation, not a bug).

use crate::path::matcher;
use crate::path::ruleset::RuleSet;
use crate::path::walker::HierarchyWalker;
use crate::path::PathError;
use anyhow::Context;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

pub struct PathAuthority {
    base_directory: PathBuf,
    walker: HierarchyWalker,
    rule_set_cache: RwLock<HashMap<PathBuf, Arc<RuleSet>>>,
}

impl PathAuthority {
    /// Create an authority rooted at `base_directory`. The directory must
    /// exist; it is canonicalized once and every later operation is
    /// confined to it.
    pub fn new(base_directory: &Path) -> anyhow::Result<Self> {
        let base_directory = base_directory.canonicalize().with_context(|| {
            format!(
                "Failed to resolve base directory: {}",
                base_directory.display()
            )
        })?;

        Ok(Self {
            walker: HierarchyWalker::new(base_directory.clone()),
            base_directory,
            rule_set_cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Resolve a relative or absolute path to an absolute, normalized path
    /// inside the base directory. `.` and `..` are folded lexically, so the
    /// target does not have to exist. This is the sandboxing boundary:
    /// anything that lands outside the base fails with [`PathError::Escape`].
    pub fn resolve(&self, path: &str) -> Result<PathBuf, PathError> {
        let requested = Path::new(path);
        let joined = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            self.base_directory.join(requested)
        };

        let normalized = normalize(&joined);
        if !normalized.starts_with(&self.base_directory) {
            return Err(PathError::Escape { path: normalized });
        }
        Ok(normalized)
    }

    /// Decide whether `path` is excluded by the ignore files between its
    /// containing directory and the base directory.
    ///
    /// The directory distinction is purely lexical: a trailing separator
    /// marks the candidate as a directory, matching gitignore's behavior on
    /// paths that do not exist on disk. No `stat` is performed.
    pub fn should_ignore(&self, path: &str) -> Result<bool, PathError> {
        let is_dir = path.ends_with('/') || path.ends_with('\\');
        let resolved = self.resolve(path)?;

        let candidate = resolved
            .strip_prefix(&self.base_directory)
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .map_err(|_| PathError::Escape {
                path: resolved.clone(),
            })?;

        let containing = match resolved.parent() {
            Some(parent) if parent.starts_with(&self.base_directory) => parent.to_path_buf(),
            _ => self.base_directory.clone(),
        };

        let mut rule_sets = Vec::new();
        for directory in self.walker.directories(&containing)? {
            let set = self.rule_set_for(&directory);
            if !set.is_empty() {
                rule_sets.push(set);
            }
        }

        Ok(matcher::is_ignored(&candidate, is_dir, &rule_sets))
    }

    fn rule_set_for(&self, directory: &Path) -> Arc<RuleSet> {
        if let Some(hit) = self.rule_set_cache.read().unwrap().get(directory) {
            return hit.clone();
        }

        // Racing loads of the same directory is fine: rule sets are pure
        // functions of on-disk content, so last writer wins.
        let set = Arc::new(RuleSet::load(directory, &self.base_directory));
        self.rule_set_cache
            .write()
            .unwrap()
            .insert(directory.to_path_buf(), set.clone());
        set
    }
}

/// Fold `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
