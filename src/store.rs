//! Bearer-file persistence for a fetched access token.
//!
//! The token is written verbatim to a plain-text file: exactly the token
//! string, no trailing newline, no surrounding structure. Each successful
//! fetch truncates and rewrites the file, so N successful runs leave the
//! same contents as one. The file is never read back by this crate; it
//! exists for other tooling to pick up.
//!
//! The write is a plain truncate-write, not a temp-file-then-rename. A
//! concurrent run racing on the same path is out of scope.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write bearer file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination file for the access token.
#[derive(Clone, Debug)]
pub struct BearerFile {
    path: PathBuf,
}

impl BearerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate-write the token string. Creates the file if absent,
    /// overwrites it otherwise.
    pub fn write(&self, token: &str) -> Result<(), StoreError> {
        fs::write(&self.path, token).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("wrote bearer file: {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_stores_exact_token_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let file = BearerFile::new(dir.path().join("token.txt"));
        file.write("abc123").unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "abc123");
    }

    #[test]
    fn write_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = BearerFile::new(dir.path().join("token.txt"));
        file.write("a-much-longer-previous-token").unwrap();
        file.write("short").unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "short");
    }

    #[test]
    fn write_into_missing_dir_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = BearerFile::new(dir.path().join("nope").join("token.txt"));
        let err = file.write("abc").unwrap_err();
        assert!(err.to_string().contains("token.txt"));
    }
}
