//! Upward walk from a target directory to the base directory.
//!
//! The walk is an explicit loop bounded by the base directory. It never
//! inspects anything above the base, so ignore files outside the sandbox
//! cannot influence matching and the traversal cannot run off toward the
//! filesystem root.

use crate::path::ruleset::RuleSet;
use crate::path::PathError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct HierarchyWalker {
    base_directory: PathBuf,
}

impl HierarchyWalker {
    pub fn new(base_directory: PathBuf) -> Self {
        Self { base_directory }
    }

    /// The directories between the base and `target` (both inclusive), in
    /// root-to-leaf order. Fails if `target` is not equal to or a
    /// descendant of the base directory.
    pub fn directories(&self, target: &Path) -> Result<Vec<PathBuf>, PathError> {
        if !target.starts_with(&self.base_directory) {
            return Err(PathError::OutsideBase {
                directory: target.to_path_buf(),
            });
        }

        let mut visited = Vec::new();
        let mut current = target.to_path_buf();
        loop {
            visited.push(current.clone());
            if current == self.base_directory {
                break;
            }
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                // Unreachable given the containment check above; stop rather
                // than walk past the filesystem root.
                None => break,
            }
        }

        // Visitation order is leaf to root; callers need root to leaf so
        // that later (deeper) rule sets win during matching.
        visited.reverse();
        Ok(visited)
    }

    /// Collect the rule sets applicable to `target`, root to leaf, skipping
    /// directories without an ignore file. Uncached; the path authority
    /// layers its per-directory cache on top of [`Self::directories`].
    pub fn collect_rule_sets(&self, target: &Path) -> Result<Vec<Arc<RuleSet>>, PathError> {
        let sets = self
            .directories(target)?
            .iter()
            .map(|dir| Arc::new(RuleSet::load(dir, &self.base_directory)))
            .filter(|set| !set.is_empty())
            .collect();
        Ok(sets)
    }
}
