use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::encoding::null_as_default;

/// Parsed build recipe.
///
/// The bundle owns one of these but never interprets it: a parser produces
/// it, phase executors consume it. Every field defaults on decode, and unset
/// maps and lists may arrive as `null`, so partial recipes written by other
/// tools still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// Header keywords (`bootstrap`, `from`, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub header: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_data: ImageData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub build_data: BuildData,
    /// Sections the parser did not recognise, keyed by section name
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_data: BTreeMap<String, String>,
    /// Original recipe text
    #[serde(default, with = "crate::encoding::base64_bytes")]
    pub raw: Vec<u8>,
}

/// Content that ends up inside the image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scripts: ImageScripts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageScripts {
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub runscript: String,
    #[serde(default)]
    pub test: String,
    #[serde(default)]
    pub startscript: String,
}

/// Content only used while building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<FileTransfer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scripts: BuildScripts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildScripts {
    #[serde(default)]
    pub pre: String,
    #[serde(default)]
    pub setup: String,
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub test: String,
}

/// One `src dst` line of the `files` section. An empty `dst` means "same
/// path inside the image".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTransfer {
    pub src: String,
    #[serde(default)]
    pub dst: String,
}

impl Definition {
    /// Names of the sections this recipe actually defines, in build order.
    ///
    /// Phase executors pair this with the section gate: a phase runs only if
    /// the recipe has a body for it and the gate admits it.
    pub fn defined_sections(&self) -> Vec<&'static str> {
        let scripts = &self.build_data.scripts;
        let image = &self.image_data.scripts;
        [
            ("pre", !scripts.pre.is_empty()),
            ("setup", !scripts.setup.is_empty()),
            ("files", !self.build_data.files.is_empty()),
            ("post", !scripts.post.is_empty()),
            ("environment", !image.environment.is_empty()),
            ("runscript", !image.runscript.is_empty()),
            ("startscript", !image.startscript.is_empty()),
            ("labels", !self.image_data.labels.is_empty()),
            ("help", !image.help.is_empty()),
            ("test", !image.test.is_empty() || !scripts.test.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}
