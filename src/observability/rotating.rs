//! Append-only line writer that rotates by size.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the file grows past 10 MiB.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the live one.
pub const KEPT_BACKUPS: usize = 3;

/// Line writer behind a mutex; the file is opened lazily on first write.
///
/// Rotated files are named `<stem>.json.<unix seconds>`.
pub struct RotatingFile {
    path: PathBuf,
    limit: u64,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_BYTES)
    }

    pub const fn with_limit(path: PathBuf, limit: u64) -> Self {
        Self {
            path,
            limit,
            handle: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` and a newline, rotating first when over the limit.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be rotated, opened or
    /// written, or when a previous writer panicked while holding the lock.
    pub fn append(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        let oversized = fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.limit);
        if oversized {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file unavailable"))?;
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();

        if self.path.exists() {
            fs::rename(&self.path, self.path.with_extension(format!("json.{stamp}")))?;
        }
        self.prune()
    }

    /// Deletes all but the newest [`KEPT_BACKUPS`] rotated files.
    fn prune(&self) -> io::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        let Some(stem) = self.path.file_stem().and_then(|s| s.to_str()) else {
            return Ok(());
        };
        let prefix = format!("{stem}.json.");

        let mut backups: Vec<(Option<std::time::SystemTime>, PathBuf)> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .map(|path| (fs::metadata(&path).and_then(|m| m.modified()).ok(), path))
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

        for (_, stale) in backups.iter().skip(KEPT_BACKUPS) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::new(dir.path().join("zentask-otlp.json"));

        writer.append("{\"a\":1}").unwrap();
        writer.append("{\"b\":2}").unwrap();

        let text = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(text, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_past_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zentask-otlp.json");
        let writer = RotatingFile::with_limit(path.clone(), 8);

        writer.append("0123456789").unwrap();
        writer.append("next").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "next\n");
        let rotated = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("zentask-otlp.json."))
            .count();
        assert_eq!(rotated, 1);
    }

    #[test]
    fn prunes_old_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zentask-otlp.json");
        for stamp in 1..=5 {
            fs::write(dir.path().join(format!("zentask-otlp.json.{stamp}")), "old").unwrap();
        }
        let writer = RotatingFile::with_limit(path, 2);

        writer.append("live").unwrap();
        writer.append("again").unwrap();

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("zentask-otlp.json."))
            .count();
        assert_eq!(backups, KEPT_BACKUPS);
    }
}
