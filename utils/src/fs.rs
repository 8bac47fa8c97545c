//! Idempotent filesystem operations.
//!
//! Snippet files are edited by the user while we read them, so a check-then-act
//! sequence (`exists()` followed by `create`/`read`) can be invalidated between
//! the two steps. These helpers act first and interpret the outcome instead.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

/// Outcome of [`ensure_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    /// The directory was created by this call.
    Created,
    /// The directory already existed.
    Existing,
}

/// Ensure `path` exists as a directory, creating parents as needed.
///
/// Succeeds when the directory already exists, including when another process
/// creates it concurrently. Fails if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> io::Result<DirStatus> {
    match fs::create_dir(path) {
        Ok(()) => Ok(DirStatus::Created),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            if fs::metadata(path)?.is_dir() {
                Ok(DirStatus::Existing)
            } else {
                Err(io::Error::new(
                    ErrorKind::AlreadyExists,
                    format!("{} exists and is not a directory", path.display()),
                ))
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(path)?;
            Ok(DirStatus::Created)
        }
        Err(e) => Err(e),
    }
}

/// Read a UTF-8 file, treating a missing file as empty content.
pub fn read_or_empty(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}
