//! Logging capability handed to the allocator.
//!
//! The allocator never reaches for a process-wide logger itself; whoever
//! builds it decides where bundle events go. [`TracingLog`] forwards them to
//! `tracing`, which is what the CLI uses.

use std::path::PathBuf;

/// Something worth recording while a bundle is being staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleEvent {
    /// Staging root allocated.
    StagingCreated { path: PathBuf },
    /// Directory for a filesystem object created under the staging root.
    FsObjectCreated { label: String, path: PathBuf },
}

pub trait BuildLog: Send + Sync {
    fn record(&self, event: &BundleEvent);
}

/// Forwards bundle events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl BuildLog for TracingLog {
    fn record(&self, event: &BundleEvent) {
        match event {
            BundleEvent::StagingCreated { path } => {
                tracing::debug!(path = %path.display(), "created temporary directory for bundle");
            }
            BundleEvent::FsObjectCreated { label, path } => {
                tracing::debug!(%label, path = %path.display(), "created filesystem object");
            }
        }
    }
}
