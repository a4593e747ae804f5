//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write content so that readers see either the old file or the complete new one.
    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        self.write_atomic_all(&[(path, content)])
    }

    /// Write several files as one unit: every file is staged before any is
    /// replaced, so a failed write leaves all targets untouched.
    fn write_atomic_all(&self, files: &[(&Path, &str)]) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_atomic_all(&self, files: &[(&Path, &str)]) -> io::Result<()> {
        let mut staged = Vec::with_capacity(files.len());
        for (path, content) in files {
            let tmp = stage(path, content).map_err(|e| with_path(path, e))?;
            staged.push((tmp, *path));
        }
        for (tmp, path) in staged {
            tmp.persist(path).map_err(|e| with_path(path, e.error))?;
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Write content to a temp file next to `path`; dropping it discards the write.
fn stage(path: &Path, content: &str) -> io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    // Same dir as the target so the final rename never crosses devices
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    Ok(tmp)
}

fn with_path(path: &Path, e: io::Error) -> io::Error {
    io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
}
