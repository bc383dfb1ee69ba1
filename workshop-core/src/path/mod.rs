//! The path module confines every file operation to a single base directory
//! and decides which paths are excluded by gitignore-style rules.
//!
//! ## Architecture
//!
//! ### pattern.rs
//! Compiles one raw ignore-file line into a structured pattern: negation,
//! anchoring, directory-only marker and per-segment glob matchers. Blank and
//! comment lines compile to nothing; malformed globs compile to patterns
//! that match little or nothing rather than failing.
//!
//! ### ruleset.rs
//! The ordered patterns of one ignore file, tagged with the directory they
//! were declared in. Unreadable files yield an empty set.
//!
//! ### walker.rs
//! Walks from a target directory up to the base directory (never above it)
//! and reports the directories that may contribute rule sets, root first.
//!
//! ### matcher.rs
//! Pure last-match-wins evaluation of a candidate path against the merged
//! rule sets. Deeper directories are evaluated later and therefore win.
//!
//! ### authority.rs
//! The facade the rest of the crate uses: owns the base directory, resolves
//! and validates paths, caches rule sets per directory, and answers
//! `should_ignore` queries.

pub mod authority;
pub mod matcher;
pub mod pattern;
pub mod ruleset;
pub mod walker;

pub use authority::PathAuthority;

use std::path::PathBuf;
use thiserror::Error;

/// Name of the per-directory ignore file.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

#[derive(Debug, Error)]
pub enum PathError {
    /// The resolved path falls outside the base directory. Surfaced to the
    /// caller; the operation is aborted and never retried.
    #[error("path escapes the base directory: {path}")]
    Escape { path: PathBuf },

    /// A rule-set walk was requested for a directory that is not inside the
    /// base directory. This is a programming error in the caller.
    #[error("directory is not within the base directory: {directory}")]
    OutsideBase { directory: PathBuf },
}
