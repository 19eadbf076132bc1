//! File attachments for upload fields.
//!
//! Files are referenced by path and only their name and size are kept; the
//! plugin never reads file contents.

use crate::domain::error::{Result, ZenTaskError};
use crate::infrastructure::paths::expand_tilde;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Limits applied when files are added to an [`UploadQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_files: usize,
    pub max_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl UploadPolicy {
    /// Hint line shown under the upload field.
    #[must_use]
    pub fn hint(&self) -> String {
        format!(
            "Max {} files, {} each",
            self.max_files,
            format_file_size(self.max_size)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

impl UploadedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Reads name and size of a file on the host.
    ///
    /// `~` expands to the sandbox home mount.
    ///
    /// # Errors
    ///
    /// Returns [`ZenTaskError::Io`] if the path does not exist or is not a
    /// regular file.
    pub fn from_path(path: &str) -> Result<Self> {
        let resolved = expand_tilde(path.trim());
        let metadata = std::fs::metadata(&resolved)?;
        if !metadata.is_file() {
            return Err(ZenTaskError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{resolved} is not a regular file"),
            )));
        }
        let name = Path::new(&resolved)
            .file_name()
            .map_or_else(|| resolved.clone(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(name, metadata.len()))
    }
}

/// Files attached to one upload field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadQueue {
    policy: UploadPolicy,
    files: Vec<UploadedFile>,
}

impl UploadQueue {
    #[must_use]
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            policy,
            files: Vec::new(),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    #[must_use]
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.files.len() >= self.policy.max_files
    }

    /// Adds files, returning how many were accepted.
    ///
    /// Incoming files are first cut to the free slots, then files above the
    /// size limit are dropped.
    pub fn add(&mut self, incoming: Vec<UploadedFile>) -> usize {
        let free = self.policy.max_files.saturating_sub(self.files.len());
        let max_size = self.policy.max_size;
        let before = self.files.len();
        self.files.extend(
            incoming
                .into_iter()
                .take(free)
                .filter(|f| f.size <= max_size),
        );
        self.files.len() - before
    }

    pub fn remove(&mut self, index: usize) -> Option<UploadedFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Comma-separated file names.
    #[must_use]
    pub fn names(&self) -> String {
        self.files
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Human-readable size with binary units and at most two decimals.
///
/// ```
/// use zentask::sheet::upload::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn files(sizes: &[u64]) -> Vec<UploadedFile> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, s)| UploadedFile::new(format!("f{i}"), *s))
            .collect()
    }

    #[test]
    fn slots_are_cut_before_size_filter() {
        let mut queue = UploadQueue::default();
        queue.add(files(&[1, 2, 3]));
        let big = DEFAULT_MAX_FILE_SIZE + 1;
        let accepted = queue.add(files(&[big, 5, 6]));
        assert_eq!(accepted, 1, "only two slots; the oversized one is dropped");
        assert_eq!(queue.files().len(), 4);
        assert!(!queue.is_full());
    }

    #[test]
    fn remove_by_index() {
        let mut queue = UploadQueue::default();
        queue.add(files(&[1, 2]));
        assert_eq!(queue.remove(0).map(|f| f.name), Some("f0".to_string()));
        assert_eq!(queue.remove(4), None);
        assert_eq!(queue.names(), "f1");
    }

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1_500_000), "1.43 MB");
    }

    #[test]
    fn from_path_reads_metadata() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 2048]).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let uploaded = UploadedFile::from_path(&path).unwrap();
        assert_eq!(uploaded.size, 2048);

        let dir = tempfile::tempdir().unwrap();
        assert!(UploadedFile::from_path(&dir.path().to_string_lossy()).is_err());
    }
}
