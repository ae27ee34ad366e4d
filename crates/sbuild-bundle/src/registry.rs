use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BundleError;

/// Label of a filesystem object inside a bundle.
///
/// The well-known labels get their own variants; anything a collaborator
/// invents travels as [`FsLabel::Custom`]. On the wire every label is a plain
/// string, and equality/ordering follow that string, so
/// `FsLabel::Custom("rootfs".into()) == FsLabel::Rootfs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FsLabel {
    /// Root filesystem tree the recipe builds into
    Rootfs,
    /// Container metadata directory (exec scripts, env, labels)
    Metadata,
    /// Data files packaged alongside the rootfs
    Data,
    Custom(String),
}

impl FsLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rootfs => "rootfs",
            Self::Metadata => ".singularity.d",
            Self::Data => "data",
            Self::Custom(label) => label,
        }
    }
}

impl From<&str> for FsLabel {
    fn from(label: &str) -> Self {
        match label {
            "rootfs" => Self::Rootfs,
            ".singularity.d" => Self::Metadata,
            "data" => Self::Data,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl From<String> for FsLabel {
    fn from(label: String) -> Self {
        match Self::from(label.as_str()) {
            Self::Custom(_) => Self::Custom(label),
            known => known,
        }
    }
}

impl From<FsLabel> for String {
    fn from(label: FsLabel) -> Self {
        match label {
            FsLabel::Custom(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for FsLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for FsLabel {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for FsLabel {}

impl PartialOrd for FsLabel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FsLabel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

/// Relative subpath of the rootfs inside a fresh bundle.
pub const ROOTFS_DIR: &str = "fs";

/// Filesystem objects of a bundle: label → path relative to the staging root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FsObjects(BTreeMap<FsLabel, PathBuf>);

impl FsObjects {
    /// Layout every freshly allocated bundle starts with.
    pub fn with_defaults() -> Self {
        let mut objects = Self::default();
        objects.0.insert(FsLabel::Rootfs, PathBuf::from(ROOTFS_DIR));
        objects
    }

    pub fn get(&self, label: &FsLabel) -> Option<&Path> {
        self.0.get(label).map(PathBuf::as_path)
    }

    pub fn contains(&self, label: &FsLabel) -> bool {
        self.0.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FsLabel, &Path)> {
        self.0.iter().map(|(label, rel)| (label, rel.as_path()))
    }

    /// Register (or re-point) `label` at `relative`. Nothing is created on disk.
    ///
    /// `relative` must stay inside the staging root: no absolute paths, no
    /// `..`, and not the root itself.
    pub fn register(
        &mut self,
        label: impl Into<FsLabel>,
        relative: impl Into<PathBuf>,
    ) -> Result<Option<PathBuf>, BundleError> {
        let label = label.into();
        let relative = relative.into();
        validate_relative(&label, &relative)?;
        Ok(self.0.insert(label, relative))
    }

    /// Absolute path of `label` under `root`.
    ///
    /// Unregistered labels are an error; they never fall back to `root`.
    pub fn resolve(&self, root: &Path, label: &FsLabel) -> Result<PathBuf, BundleError> {
        self.get(label)
            .map(|rel| root.join(rel))
            .ok_or_else(|| BundleError::UnresolvedLabel {
                label: label.to_string(),
            })
    }
}

fn validate_relative(label: &FsLabel, relative: &Path) -> Result<(), BundleError> {
    let invalid = |reason| BundleError::InvalidRelativePath {
        label: label.to_string(),
        path: relative.to_path_buf(),
        reason,
    };

    if relative.is_absolute() || relative.has_root() {
        return Err(invalid("must be relative to the bundle root"));
    }
    let mut normal = 0usize;
    for component in relative.components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("must not contain '..'")),
            Component::Prefix(_) | Component::RootDir => {
                return Err(invalid("must be relative to the bundle root"));
            }
        }
    }
    if normal == 0 {
        return Err(invalid("must name a directory below the bundle root"));
    }
    Ok(())
}
