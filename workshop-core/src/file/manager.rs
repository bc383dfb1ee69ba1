use crate::path::PathAuthority;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Sandboxed file operations over the base directory.
///
/// Every path is resolved through the [`PathAuthority`] first, so escapes
/// abort before any I/O happens. Listings are filtered through the ignore
/// rules; paths handed back to callers are relative to the base directory.
#[derive(Clone)]
pub struct FileManager {
    authority: Arc<PathAuthority>,
}

impl FileManager {
    pub fn new(authority: Arc<PathAuthority>) -> Self {
        Self { authority }
    }

    pub fn authority(&self) -> &Arc<PathAuthority> {
        &self.authority
    }

    pub async fn read_file(&self, file_path: &str) -> Result<String> {
        let path = self.authority.resolve(file_path)?;

        if !path.exists() {
            anyhow::bail!("File not found: {}", file_path);
        }

        if !path.is_file() {
            anyhow::bail!("Path is not a file: {}", file_path);
        }

        fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read file: {file_path}"))
    }

    pub async fn write_file(&self, file_path: &str, content: &str) -> Result<()> {
        let path = self.authority.resolve(file_path)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create parent directories for: {file_path}")
            })?;
        }

        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write file: {file_path}"))
    }

    pub async fn delete_file(&self, file_path: &str) -> Result<()> {
        let path = self.authority.resolve(file_path)?;

        let metadata = fs::metadata(&path)
            .await
            .with_context(|| format!("Failed to get metadata for: {file_path}"))?;

        if metadata.is_dir() {
            fs::remove_dir(&path)
                .await
                .with_context(|| format!("Failed to delete directory: {file_path}"))?;
        } else {
            fs::remove_file(&path)
                .await
                .with_context(|| format!("Failed to delete file: {file_path}"))?;
        }

        Ok(())
    }

    /// List a directory, relative to the base, with ignored entries removed.
    pub async fn list_directory(&self, directory_path: &str) -> Result<Vec<PathBuf>> {
        let dir_path = self.authority.resolve(directory_path)?;

        if !dir_path.exists() {
            anyhow::bail!("Directory not found: {}", directory_path);
        }

        if !dir_path.is_dir() {
            anyhow::bail!("Path is not a directory: {}", directory_path);
        }

        let mut entries = fs::read_dir(&dir_path)
            .await
            .with_context(|| format!("Failed to read directory: {directory_path}"))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Some(relative) = self.relative_candidate(&entry.path()).await else {
                // Broken symlink or an entry we cannot stat.
                continue;
            };
            if self.authority.should_ignore(&relative)? {
                continue;
            }
            paths.push(PathBuf::from(relative.trim_end_matches('/')));
        }

        paths.sort();
        Ok(paths)
    }

    pub async fn file_exists(&self, file_path: &str) -> Result<bool> {
        let path = self.authority.resolve(file_path)?;
        Ok(path.exists())
    }

    /// Base-relative, `/`-separated form of an on-disk path, with a
    /// trailing `/` when the entry is a directory so ignore matching sees
    /// the lexical directory marker.
    async fn relative_candidate(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.authority.base_directory()).ok()?;
        let mut candidate = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if fs::metadata(path).await.ok()?.is_dir() {
            candidate.push('/');
        }
        Some(candidate)
    }
}
