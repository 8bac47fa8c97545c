//! Shared infrastructure utilities for Quire.
//!
//! - **`atomic_write`**: all-or-nothing file persistence (temp + rename)
//! - **`fs`**: idempotent "ensure exists" and "read or empty" operations that
//!   tolerate concurrent external modification

pub mod atomic_write;
pub mod fs;

pub use atomic_write::{
    AtomicWriteOptions, FileSyncPolicy, ParentDirSyncPolicy, atomic_write, atomic_write_new,
    atomic_write_new_with_options, atomic_write_with_options,
};
pub use fs::{DirStatus, ensure_dir, read_or_empty};
