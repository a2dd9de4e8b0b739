//! File provider contract and filesystem implementation.
//!
//! # Responsibility
//! - Define the four file operations the store depends on for durability.
//! - Resolve store-relative paths against one root directory.
//!
//! # Invariants
//! - `write` replaces the whole file; a failed write leaves the previous
//!   content in place.
//! - Provider methods never panic; failures surface as `false` / `None`.

use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Durability capability consumed by the astro store.
///
/// Paths are relative to whatever root the implementation owns.
pub trait FileProvider {
    fn exists(&self, path: &str) -> bool;
    /// Returns `None` when the file cannot be read.
    fn read(&self, path: &str) -> Option<String>;
    /// Returns `false` when the write did not take effect.
    fn write(&self, path: &str, content: &str) -> bool;
    /// Creates `path` and its parents when missing.
    fn ensure_directory(&self, path: &str) -> bool;
}

impl<T: FileProvider + ?Sized> FileProvider for &T {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &str) -> Option<String> {
        (**self).read(path)
    }

    fn write(&self, path: &str, content: &str) -> bool {
        (**self).write(path, content)
    }

    fn ensure_directory(&self, path: &str) -> bool {
        (**self).ensure_directory(path)
    }
}

/// I/O failure inside a filesystem provider.
#[derive(Debug)]
pub enum ProviderError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error at `{}`: {source}", path.display()),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Filesystem provider rooted at one directory.
#[derive(Debug, Clone)]
pub struct FsFileProvider {
    root: PathBuf,
}

impl FsFileProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (or root-relative) location of a store path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Reads a whole file as UTF-8.
    pub fn try_read(&self, path: &str) -> Result<String, ProviderError> {
        let target = self.resolve(path);
        std::fs::read_to_string(&target).map_err(|source| ProviderError::Io {
            path: target,
            source,
        })
    }

    /// Writes to a sibling temp file, then renames it over the target.
    pub fn try_write(&self, path: &str, content: &str) -> Result<(), ProviderError> {
        let target = self.resolve(path);
        let dir = target
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let io_error = |source: std::io::Error| ProviderError::Io {
            path: target.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&dir).map_err(io_error)?;
        temp.write_all(content.as_bytes()).map_err(io_error)?;
        temp.flush().map_err(io_error)?;
        temp.persist(&target).map_err(|err| io_error(err.error))?;
        Ok(())
    }

    pub fn try_ensure_directory(&self, path: &str) -> Result<(), ProviderError> {
        let target = self.resolve(path);
        std::fs::create_dir_all(&target).map_err(|source| ProviderError::Io {
            path: target,
            source,
        })
    }
}

impl FileProvider for FsFileProvider {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn read(&self, path: &str) -> Option<String> {
        debug!("event=file_read module=provider status=start path={path}");
        match self.try_read(path) {
            Ok(content) => Some(content),
            Err(err) => {
                error!("event=file_read module=provider status=error path={path} error={err}");
                None
            }
        }
    }

    fn write(&self, path: &str, content: &str) -> bool {
        debug!(
            "event=file_write module=provider status=start path={path} bytes={}",
            content.len()
        );
        match self.try_write(path, content) {
            Ok(()) => true,
            Err(err) => {
                error!("event=file_write module=provider status=error path={path} error={err}");
                false
            }
        }
    }

    fn ensure_directory(&self, path: &str) -> bool {
        match self.try_ensure_directory(path) {
            Ok(()) => true,
            Err(err) => {
                error!("event=mkdir module=provider status=error path={path} error={err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileProvider, FsFileProvider};

    #[test]
    fn write_then_read_roundtrip_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsFileProvider::new(dir.path());

        assert!(!provider.exists("data.json"));
        assert!(provider.write("data.json", "[]"));
        assert!(provider.exists("data.json"));
        assert_eq!(provider.read("data.json").as_deref(), Some("[]"));
        assert!(dir.path().join("data.json").is_file());
    }

    #[test]
    fn write_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsFileProvider::new(dir.path());

        assert!(provider.write("data.json", "[1, 2, 3]"));
        assert!(provider.write("data.json", "[]"));
        assert_eq!(provider.read("data.json").as_deref(), Some("[]"));
    }

    #[test]
    fn write_into_missing_directory_fails_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsFileProvider::new(dir.path());

        assert!(!provider.write("missing/data.json", "[]"));
        assert!(provider.ensure_directory("missing"));
        assert!(provider.write("missing/data.json", "[]"));
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsFileProvider::new(dir.path());
        assert_eq!(provider.read("nope.json"), None);
    }
}
