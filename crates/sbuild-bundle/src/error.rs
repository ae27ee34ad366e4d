use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("failed to create staging directory under {temp_root}")]
    Allocation {
        temp_root: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create directory {path} for filesystem object '{label}'")]
    DirectoryCreation {
        label: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("filesystem object '{label}' is not registered in the bundle")]
    UnresolvedLabel { label: String },

    #[error("invalid path {path:?} for filesystem object '{label}': {reason}")]
    InvalidRelativePath {
        label: String,
        path: PathBuf,
        reason: &'static str,
    },

    #[error("failed to encode bundle descriptor")]
    Encode { source: serde_json::Error },

    #[error("failed to decode bundle descriptor")]
    Decode { source: serde_json::Error },

    #[error("failed to write bundle descriptor to {path}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read bundle descriptor from {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
