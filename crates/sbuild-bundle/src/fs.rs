use std::path::{Path, PathBuf};

/// Abstraction over the filesystem calls the allocator makes, for testability.
///
/// Production code uses [`HostFs`], tests use mockall-generated mocks.
pub trait StagingFs: Send + Sync {
    /// Directory new staging roots are created under.
    fn temp_root(&self) -> PathBuf;

    /// Create a new, uniquely named directory under `root` whose name starts
    /// with `prefix`. Uniqueness is this call's guarantee.
    fn create_unique_dir(&self, root: &Path, prefix: &str) -> std::io::Result<PathBuf>;

    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// Real filesystem.
pub struct HostFs;

impl StagingFs for HostFs {
    fn temp_root(&self) -> PathBuf {
        std::env::temp_dir()
    }

    fn create_unique_dir(&self, root: &Path, prefix: &str) -> std::io::Result<PathBuf> {
        // The directory outlives this call; removal belongs to build cleanup.
        let dir = tempfile::Builder::new().prefix(prefix).tempdir_in(root)?;
        Ok(dir.keep())
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(path)
    }
}
