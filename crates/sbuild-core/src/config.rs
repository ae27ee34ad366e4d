use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default staging-directory prefix used when none is given.
pub const DEFAULT_PREFIX: &str = "sbuild-";

/// sbuild.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SbuildConfig {
    #[serde(default)]
    pub bundle: BundleConfig,
    #[serde(default)]
    pub build: BuildOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Staging directory name prefix (defaults to `sbuild-`)
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Directory the staging root is created under (defaults to the system temp dir)
    #[serde(default)]
    pub temp_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Sections to run, in evaluation order
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    /// Overwrite existing output
    #[serde(default)]
    pub force: bool,
    /// Build on top of an existing sandbox
    #[serde(default)]
    pub update: bool,
    /// Skip the test section
    #[serde(default)]
    pub no_test: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            temp_root: None,
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            force: false,
            update: false,
            no_test: false,
        }
    }
}

impl BundleConfig {
    /// Staging directory prefix, with an empty hint replaced by the default.
    pub fn effective_prefix<'a>(&'a self, hint: &'a str) -> &'a str {
        if !hint.is_empty() {
            hint
        } else if !self.prefix.is_empty() {
            self.prefix.as_str()
        } else {
            DEFAULT_PREFIX
        }
    }
}

impl SbuildConfig {
    /// Load from sbuild.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = dir.join("sbuild.toml");
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            tracing::debug!(path = %config_path.display(), "loading config");
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_owned()
}

fn default_sections() -> Vec<String> {
    vec!["all".to_owned()]
}
