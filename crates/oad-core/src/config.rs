use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::transform::builder::BuildOptions;
use crate::validate::IssueKind;

/// Project configuration loaded from `.oad.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OadConfig {
    pub input: String,
    pub validation: ValidationConfig,
    pub navigation: NavigationConfig,
}

impl Default for OadConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            validation: ValidationConfig::default(),
            navigation: NavigationConfig::default(),
        }
    }
}

impl OadConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            default_tag: self.navigation.default_tag.clone(),
            ungrouped: self.navigation.ungrouped.clone(),
            suppress: self.validation.suppress.clone(),
        }
    }
}

/// How validation findings are reported.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Treat non-fatal issues as failures in `oad validate`.
    pub deny_warnings: bool,
    /// Issue kinds dropped from reports.
    pub suppress: Vec<IssueKind>,
}

/// Tag grouping labels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Group name for operations without tags.
    pub default_tag: String,
    /// Navigation group for tags that no `x-tagGroups` entry lists.
    pub ungrouped: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_tag: "default".to_string(),
            ungrouped: "Other".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oad.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OadConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: OadConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oad configuration
input: openapi.yaml

validation:
  deny_warnings: false   # fail `oad validate` on warnings too
  suppress: []
    # - missing_operation_id
    # - missing_description

navigation:
  default_tag: default   # group for operations without tags
  ungrouped: Other       # nav group for tags missing from x-tagGroups
"#
}
