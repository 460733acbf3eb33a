// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scratch area — the transient staging directory for one join at a time.
//
// Staging filenames carry a zero-padded sequence number, so filesystem sort
// order equals page order.  This is both the naming strategy and the merge
// ordering guarantee; do not change the scheme.

use std::fs;
use std::path::{Path, PathBuf};

use bundwerk_core::error::{BundwerkError, Result};
use bundwerk_core::JoinConfig;
use tracing::debug;

/// Process-local staging directory.  Exclusively owned by the in-flight
/// join; at most one join per `ScratchArea` at a time.
pub struct ScratchArea {
    root: PathBuf,
}

impl ScratchArea {
    /// A scratch area rooted at an explicit directory (tests use this).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured scratch area under the platform temp directory.
    pub fn from_config(config: &JoinConfig) -> Self {
        Self::new(config.scratch_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the scratch directory if absent.  Idempotent.
    pub fn ensure(&self) -> Result<&Path> {
        fs::create_dir_all(&self.root).map_err(|e| {
            BundwerkError::Scratch(format!("create {}: {e}", self.root.display()))
        })?;
        debug!(path = %self.root.display(), "scratch directory ready");
        Ok(&self.root)
    }

    /// Deterministic staging path for the page at `index`.
    pub fn allocate(&self, index: usize) -> PathBuf {
        self.root.join(format!("file-{index:03}.jpg"))
    }

    /// Recursively remove the directory and everything staged in it.
    ///
    /// An already-absent directory is success, so cleanup can run on every
    /// exit path of a join — including ones where `ensure` never ran.
    pub fn cleanup(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => {
                debug!(path = %self.root.display(), "scratch directory removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BundwerkError::Scratch(format!(
                "remove {}: {e}",
                self.root.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_is_idempotent() {
        let tmp = TempDir::new().expect("tempdir");
        let scratch = ScratchArea::new(tmp.path().join("staging"));

        scratch.ensure().expect("first ensure");
        scratch.ensure().expect("second ensure");
        assert!(scratch.root().is_dir());
    }

    #[test]
    fn allocate_names_are_zero_padded_and_sorted() {
        let scratch = ScratchArea::new("/tmp/bundwerk-test");

        let names: Vec<String> = (0..12)
            .map(|i| {
                scratch
                    .allocate(i)
                    .file_name()
                    .expect("file name")
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();

        assert_eq!(names[0], "file-000.jpg");
        assert_eq!(names[9], "file-009.jpg");
        assert_eq!(names[11], "file-011.jpg");

        // Filesystem sort order must equal page order.
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(sorted, names);
    }

    #[test]
    fn cleanup_removes_staged_files() {
        let tmp = TempDir::new().expect("tempdir");
        let scratch = ScratchArea::new(tmp.path().join("staging"));
        scratch.ensure().expect("ensure");
        std::fs::write(scratch.allocate(0), b"page").expect("write");

        scratch.cleanup().expect("cleanup");
        assert!(!scratch.root().exists());
    }

    #[test]
    fn cleanup_of_absent_directory_is_success() {
        let tmp = TempDir::new().expect("tempdir");
        let scratch = ScratchArea::new(tmp.path().join("never-created"));
        scratch.cleanup().expect("cleanup of absent dir");
    }
}
