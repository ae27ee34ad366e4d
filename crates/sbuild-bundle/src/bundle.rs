use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sbuild_core::Definition;
use sbuild_core::encoding::{base64_map, null_as_default};
use serde::{Deserialize, Serialize};

use crate::error::BundleError;
use crate::fs::StagingFs;
use crate::log::{BuildLog, BundleEvent};
use crate::registry::{FsLabel, FsObjects};
use crate::sections::SectionGate;

/// Staging environment of a single image build.
///
/// Created by [`BundleAllocator`](crate::BundleAllocator), then read and
/// mutated by every phase of the build. It owns no cleanup logic: dropping a
/// `Bundle` leaves `path` on disk.
///
/// The JSON field names are shared with other build-phase processes and must
/// not change. Maps are ordered so the same descriptor always encodes to the
/// same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "fsObjects", default, deserialize_with = "null_as_default")]
    pub fs_objects: FsObjects,
    /// Build-time metadata blobs (derived JSON fragments and the like)
    #[serde(rename = "jsonObjects", default, with = "base64_map")]
    pub json_objects: BTreeMap<String, Vec<u8>>,
    #[serde(rename = "rawDeffile", default, deserialize_with = "null_as_default")]
    pub recipe: Definition,
    /// Host paths to bind-mount during the build, in mount order
    #[serde(rename = "bindPath", default, deserialize_with = "null_as_default")]
    pub bind_paths: Vec<PathBuf>,
    #[serde(rename = "bundlePath")]
    pub path: PathBuf,
    /// Overwrite existing output
    #[serde(default)]
    pub force: bool,
    /// Build on top of an existing sandbox
    #[serde(default)]
    pub update: bool,
    /// Skip the test section
    #[serde(rename = "noTest", default)]
    pub no_test: bool,
    /// Sections to run, in evaluation order (see [`crate::sections`])
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<String>,
}

impl Bundle {
    /// Descriptor for an already allocated staging root, with the default
    /// filesystem object layout registered but not created.
    pub(crate) fn at(path: PathBuf) -> Self {
        Self {
            fs_objects: FsObjects::with_defaults(),
            json_objects: BTreeMap::new(),
            recipe: Definition::default(),
            bind_paths: Vec::new(),
            path,
            force: false,
            update: false,
            no_test: false,
            sections: Vec::new(),
        }
    }

    /// Path to the root filesystem in the bundle.
    pub fn rootfs(&self) -> Result<PathBuf, BundleError> {
        self.resolve(FsLabel::Rootfs)
    }

    /// Absolute path of a registered filesystem object.
    pub fn resolve(&self, label: impl Into<FsLabel>) -> Result<PathBuf, BundleError> {
        self.fs_objects.resolve(&self.path, &label.into())
    }

    /// Register `label` at `relative` and create its directory.
    ///
    /// Used by collaborators that add objects on demand, e.g. the metadata
    /// directory. Returns the absolute path.
    pub fn materialize<F: StagingFs, L: BuildLog>(
        &mut self,
        label: impl Into<FsLabel>,
        relative: impl Into<PathBuf>,
        fs: &F,
        log: &L,
    ) -> Result<PathBuf, BundleError> {
        let label = label.into();
        self.fs_objects.register(label.clone(), relative)?;
        let path = self.resolve(label.clone())?;
        fs.create_dir_all(&path)
            .map_err(|e| BundleError::DirectoryCreation {
                label: label.to_string(),
                path: path.clone(),
                source: e,
            })?;
        log.record(&BundleEvent::FsObjectCreated {
            label: label.to_string(),
            path: path.clone(),
        });
        Ok(path)
    }

    /// Whether `section` should execute for this build.
    pub fn run_section(&self, section: &str) -> bool {
        self.section_gate().should_run(section)
    }

    /// Whether the test section should execute: it must pass the gate and
    /// not be disabled with `no_test`.
    pub fn run_test_section(&self) -> bool {
        !self.no_test && self.run_section("test")
    }

    pub fn section_gate(&self) -> SectionGate<'_> {
        SectionGate::new(&self.sections)
    }

    /// Store a metadata blob, returning the one it replaced.
    pub fn add_json_object(&mut self, key: impl Into<String>, blob: Vec<u8>) -> Option<Vec<u8>> {
        self.json_objects.insert(key.into(), blob)
    }

    /// Append a bind-mount source. Duplicates are kept; order is mount order.
    pub fn push_bind_path(&mut self, path: impl Into<PathBuf>) {
        self.bind_paths.push(path.into());
    }

    pub fn to_json(&self) -> Result<String, BundleError> {
        serde_json::to_string(self).map_err(|e| BundleError::Encode { source: e })
    }

    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        serde_json::from_str(json).map_err(|e| BundleError::Decode { source: e })
    }

    /// Persist the descriptor so a later phase in another process can load it.
    pub fn save(&self, file: &Path) -> Result<(), BundleError> {
        let json = serde_json::to_vec_pretty(self).map_err(|e| BundleError::Encode { source: e })?;
        std::fs::write(file, json).map_err(|e| BundleError::Persist {
            path: file.to_path_buf(),
            source: e,
        })?;
        tracing::info!(bundle = %self.path.display(), file = %file.display(), "saved bundle descriptor");
        Ok(())
    }

    pub fn load(file: &Path) -> Result<Self, BundleError> {
        let content = std::fs::read_to_string(file).map_err(|e| BundleError::Read {
            path: file.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }
}
