//! Filesystem operations the orchestrator depends on

use std::io;
use std::path::Path;
use tracing::debug;

pub trait Filesystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and all missing parents; an existing directory is fine
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}

/// Answers queries from disk but never modifies it
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunFilesystem;

impl Filesystem for DryRunFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        debug!("Dry run, not creating {:?}", path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        debug!("Dry run, not removing {:?}", path);
        Ok(())
    }
}
