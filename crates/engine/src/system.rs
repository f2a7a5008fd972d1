//! System abstraction for filesystem operations
//!
//! This module provides a trait-based abstraction over filesystem operations,
//! enabling testing and dry-run mode.

use crate::error::{Error, Result};
use ashiba_core::path::AbsPath;
use std::fs;

/// Abstraction over filesystem operations
///
/// This trait allows us to implement different backends:
/// - `RealSystem`: Actual filesystem operations
/// - `DryRunSystem`: Records operations without executing them
pub trait System {
    /// Read a file's contents
    fn read_file(&self, path: &AbsPath) -> Result<Vec<u8>>;

    /// Write a file's contents, creating parent directories as needed
    fn write_file(&self, path: &AbsPath, content: &[u8]) -> Result<()>;

    /// Copy a file
    fn copy_file(&self, from: &AbsPath, to: &AbsPath) -> Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &AbsPath) -> Result<()>;

    /// Create a directory and all its parents
    fn create_dir_all(&self, path: &AbsPath) -> Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &AbsPath) -> bool;
}

/// Real filesystem implementation
///
/// This implementation performs actual filesystem operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealSystem;

impl System for RealSystem {
    fn read_file(&self, path: &AbsPath) -> Result<Vec<u8>> {
        fs::read(path.as_path()).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })
    }

    fn write_file(&self, path: &AbsPath, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(&parent)?;
        }

        fs::write(path.as_path(), content).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e,
        })
    }

    fn copy_file(&self, from: &AbsPath, to: &AbsPath) -> Result<()> {
        if let Some(parent) = to.parent() {
            self.create_dir_all(&parent)?;
        }

        fs::copy(from.as_path(), to.as_path())
            .map(|_| ())
            .map_err(|e| Error::FileCopy {
                from: from.clone(),
                to: to.clone(),
                source: e,
            })
    }

    fn remove_file(&self, path: &AbsPath) -> Result<()> {
        fs::remove_file(path.as_path()).map_err(|e| Error::FileRemove {
            path: path.clone(),
            source: e,
        })
    }

    fn create_dir_all(&self, path: &AbsPath) -> Result<()> {
        fs::create_dir_all(path.as_path()).map_err(|e| Error::DirectoryCreate {
            path: path.clone(),
            source: e,
        })
    }

    fn exists(&self, path: &AbsPath) -> bool {
        path.as_path().exists()
    }
}

/// Dry-run system that records operations without executing them
///
/// This is useful for showing what would be done without actually modifying
/// the filesystem. Reads of not-yet-written files return the content recorded
/// by an earlier write in the same run, so injection and append operations
/// still compose in dry-run mode.
#[derive(Debug, Default)]
pub struct DryRunSystem {
    operations: std::cell::RefCell<Vec<Operation>>,
    written: std::cell::RefCell<std::collections::HashMap<AbsPath, Vec<u8>>>,
}

/// An operation that would be performed on the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Write a file
    WriteFile { path: AbsPath, size: usize },
    /// Copy a file
    CopyFile { from: AbsPath, to: AbsPath },
    /// Remove a file
    Remove { path: AbsPath },
    /// Create a directory
    CreateDir { path: AbsPath },
}

impl DryRunSystem {
    /// Create a new dry-run system
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the list of operations that would be performed
    #[must_use]
    pub fn operations(&self) -> Vec<Operation> {
        self.operations.borrow().clone()
    }

    fn record(&self, op: Operation) {
        self.operations.borrow_mut().push(op);
    }
}

impl System for DryRunSystem {
    fn read_file(&self, path: &AbsPath) -> Result<Vec<u8>> {
        if let Some(content) = self.written.borrow().get(path) {
            return Ok(content.clone());
        }
        // Fall back to the real file so dry runs over existing projects work.
        fs::read(path.as_path()).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })
    }

    fn write_file(&self, path: &AbsPath, content: &[u8]) -> Result<()> {
        self.record(Operation::WriteFile {
            path: path.clone(),
            size: content.len(),
        });
        self.written
            .borrow_mut()
            .insert(path.clone(), content.to_vec());
        Ok(())
    }

    fn copy_file(&self, from: &AbsPath, to: &AbsPath) -> Result<()> {
        let content = self.read_file(from)?;
        self.record(Operation::CopyFile {
            from: from.clone(),
            to: to.clone(),
        });
        self.written.borrow_mut().insert(to.clone(), content);
        Ok(())
    }

    fn remove_file(&self, path: &AbsPath) -> Result<()> {
        self.record(Operation::Remove { path: path.clone() });
        self.written.borrow_mut().remove(path);
        Ok(())
    }

    fn create_dir_all(&self, path: &AbsPath) -> Result<()> {
        self.record(Operation::CreateDir { path: path.clone() });
        Ok(())
    }

    fn exists(&self, path: &AbsPath) -> bool {
        self.written.borrow().contains_key(path) || path.as_path().exists()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn real_system_write_creates_parents() {
        let temp = TempDir::new().unwrap();
        let system = RealSystem;
        let path = AbsPath::new(temp.path().join("a/b/c.txt")).unwrap();

        system.write_file(&path, b"hello").unwrap();
        assert_eq!(system.read_file(&path).unwrap(), b"hello");
    }

    #[test]
    fn real_system_read_missing_fails_with_path() {
        let temp = TempDir::new().unwrap();
        let system = RealSystem;
        let path = AbsPath::new(temp.path().join("missing.txt")).unwrap();

        let err = system.read_file(&path).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn real_system_copy_and_remove() {
        let temp = TempDir::new().unwrap();
        let system = RealSystem;
        let from = AbsPath::new(temp.path().join("src.txt")).unwrap();
        let to = AbsPath::new(temp.path().join("dst.txt")).unwrap();

        system.write_file(&from, b"data").unwrap();
        system.copy_file(&from, &to).unwrap();
        assert_eq!(system.read_file(&to).unwrap(), b"data");

        system.remove_file(&from).unwrap();
        assert!(!system.exists(&from));
    }

    #[test]
    fn dry_run_records_without_touching_disk() {
        let temp = TempDir::new().unwrap();
        let system = DryRunSystem::new();
        let path = AbsPath::new(temp.path().join("out.txt")).unwrap();

        system.write_file(&path, b"content").unwrap();
        assert!(!path.as_path().exists());
        assert_eq!(
            system.operations(),
            vec![Operation::WriteFile {
                path: path.clone(),
                size: 7
            }]
        );
    }

    #[test]
    fn dry_run_reads_back_recorded_writes() {
        let system = DryRunSystem::new();
        let path = AbsPath::new("/project/file.txt".into()).unwrap();

        system.write_file(&path, b"first").unwrap();
        assert_eq!(system.read_file(&path).unwrap(), b"first");
        assert!(system.exists(&path));

        system.remove_file(&path).unwrap();
        assert!(!system.exists(&path));
    }
}
