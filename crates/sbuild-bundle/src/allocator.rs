use std::path::PathBuf;

use sbuild_core::{BuildOptions, BundleConfig};

use crate::bundle::Bundle;
use crate::error::BundleError;
use crate::fs::{HostFs, StagingFs};
use crate::log::{BuildLog, BundleEvent, TracingLog};

/// Creates bundles, parameterized over the filesystem and log for testability.
pub struct BundleAllocator<F: StagingFs = HostFs, L: BuildLog = TracingLog> {
    fs: F,
    log: L,
    config: BundleConfig,
}

impl BundleAllocator<HostFs, TracingLog> {
    pub fn new() -> Self {
        Self {
            fs: HostFs,
            log: TracingLog,
            config: BundleConfig::default(),
        }
    }
}

impl Default for BundleAllocator<HostFs, TracingLog> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: StagingFs, L: BuildLog> BundleAllocator<F, L> {
    pub fn with_capabilities(fs: F, log: L) -> Self {
        Self {
            fs,
            log,
            config: BundleConfig::default(),
        }
    }

    /// Use `[bundle]` settings from sbuild.toml (default prefix, temp root).
    pub fn with_config(mut self, config: BundleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Allocate a fresh staging root and lay out the default filesystem objects.
    ///
    /// The directory is named `<prefix>-<unique>`; an empty `prefix_hint`
    /// falls back to the configured prefix. A prefix that is not a single
    /// path component fails allocation. Directories created before a
    /// failure are left in place.
    pub fn create_bundle(&self, prefix_hint: &str) -> Result<Bundle, BundleError> {
        let prefix = self.config.effective_prefix(prefix_hint);
        let temp_root = self.temp_root()?;
        if prefix.contains(std::path::is_separator) {
            return Err(BundleError::Allocation {
                temp_root,
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("prefix {prefix:?} must not contain a path separator"),
                ),
            });
        }

        let path = self
            .fs
            .create_unique_dir(&temp_root, &format!("{prefix}-"))
            .map_err(|e| BundleError::Allocation {
                temp_root: temp_root.clone(),
                source: e,
            })?;
        self.log.record(&BundleEvent::StagingCreated { path: path.clone() });

        let bundle = Bundle::at(path);
        for (label, relative) in bundle.fs_objects.iter() {
            let dir = bundle.path.join(relative);
            self.fs
                .create_dir_all(&dir)
                .map_err(|e| BundleError::DirectoryCreation {
                    label: label.to_string(),
                    path: dir.clone(),
                    source: e,
                })?;
            self.log.record(&BundleEvent::FsObjectCreated {
                label: label.to_string(),
                path: dir,
            });
        }

        Ok(bundle)
    }

    /// [`create_bundle`](Self::create_bundle), then apply `[build]` options.
    pub fn create_with_options(
        &self,
        prefix_hint: &str,
        options: &BuildOptions,
    ) -> Result<Bundle, BundleError> {
        let mut bundle = self.create_bundle(prefix_hint)?;
        bundle.sections = options.sections.clone();
        bundle.force = options.force;
        bundle.update = options.update;
        bundle.no_test = options.no_test;
        Ok(bundle)
    }

    fn temp_root(&self) -> Result<PathBuf, BundleError> {
        let root = match &self.config.temp_root {
            Some(root) => root.clone(),
            None => self.fs.temp_root(),
        };
        // bundlePath is always absolute, even for a relative temp_root in sbuild.toml
        std::path::absolute(&root).map_err(|e| BundleError::Allocation {
            temp_root: root,
            source: e,
        })
    }
}

/// Create a bundle on the host filesystem with default settings.
pub fn create_bundle(prefix_hint: &str) -> Result<Bundle, BundleError> {
    BundleAllocator::new().create_bundle(prefix_hint)
}
