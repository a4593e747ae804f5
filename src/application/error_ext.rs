//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.create_dir_all(&build_dir)
    ///     .with_path_context("create build dir", &build_dir)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Map an I/O error on the input file.
    fn input_context(self, path: &Path) -> ApplicationResult<T>;

    /// Map an I/O error on an output artifact.
    fn output_context(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn input_context(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        })
    }

    fn output_context(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OutputFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}
