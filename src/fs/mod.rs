// src/fs/mod.rs

//! Filesystem checks used while searching for candidates.
//!
//! The locator never reads or writes files; it only asks whether a path
//! exists and what kind of entry it is. Keeping that behind a trait lets the
//! search order be tested against an in-memory tree ([`mock::MockFileSystem`]).

use std::fmt::Debug;
use std::path::Path;

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs` metadata.
///
/// Metadata errors (permission denied, broken symlinks) read as "absent".
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
