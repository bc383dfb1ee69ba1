//! Structured, sandboxed access to the base directory.
//!
//! All file I/O in the crate goes through [`manager::FileManager`]; nothing
//! else touches `tokio::fs` directly. Every path is validated by the path
//! authority before it reaches disk, and directory listings are filtered
//! through the ignore rules so excluded files never surface to clients.

pub mod manager;
