//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `ORGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::{BuildOptions, SearchOptions, UNASSIGNED};
use crate::errors::OrgError;

/// Search behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Match positions when no name matches
    pub match_position: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_position: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub unassigned_label: Option<String>,
    pub root_label: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub search: RawSearchConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSearchConfig {
    pub match_position: Option<bool>,
}

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Department of nodes that inherit none (default: "Unassigned")
    pub unassigned_label: String,
    /// Display name of the synthetic root (default: "Organization")
    pub root_label: String,
    /// Directory holding employees.json and employers.json
    pub data_dir: Option<PathBuf>,
    pub search: SearchConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unassigned_label: UNASSIGNED.to_string(),
            root_label: "Organization".to_string(),
            data_dir: None,
            search: SearchConfig::default(),
        }
    }
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, OrgError> {
    let content = std::fs::read_to_string(path).map_err(|e| OrgError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| OrgError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> OrgError {
    OrgError::Config {
        message: e.to_string(),
    }
}

/// Expand `~`, `$VAR` and `${VAR}`, keeping the input when expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            unassigned_label: overlay
                .unassigned_label
                .clone()
                .unwrap_or_else(|| self.unassigned_label.clone()),
            root_label: overlay
                .root_label
                .clone()
                .unwrap_or_else(|| self.root_label.clone()),
            data_dir: overlay.data_dir.clone().or_else(|| self.data_dir.clone()),
            search: SearchConfig {
                match_position: overlay
                    .search
                    .match_position
                    .unwrap_or(self.search.match_position),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, applied over the global one
    pub fn load(config_file: Option<&Path>) -> Result<Self, OrgError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), config_file)
    }

    /// Same as [`Settings::load`] with the global config location given explicitly.
    pub fn load_from(global: Option<&Path>, config_file: Option<&Path>) -> Result<Self, OrgError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            current = current.merge_with(&load_raw_settings(global_path)?);
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(OrgError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, OrgError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("ORGTREE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("unassigned_label") {
            settings.unassigned_label = val;
        }
        if let Ok(val) = config.get_string("root_label") {
            settings.root_label = val;
        }
        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("search.match_position") {
            settings.search.match_position = val;
        }

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        if let Some(dir) = &self.data_dir {
            self.data_dir = Some(PathBuf::from(expand_env_vars(&dir.to_string_lossy())));
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            unassigned_label: self.unassigned_label.clone(),
            root_label: self.root_label.clone(),
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            match_position: self.search.match_position,
        }
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, OrgError> {
        toml::to_string_pretty(self).map_err(|e| OrgError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_inherit() {
        let overlay: RawSettings = toml::from_str(
            r#"
root_label = "Acme"
[search]
match_position = false
"#,
        )
        .unwrap();
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.root_label, "Acme");
        assert_eq!(merged.unassigned_label, UNASSIGNED);
        assert!(!merged.search.match_position);
        assert_eq!(merged.data_dir, None);
    }

    #[test]
    fn given_env_var_in_path_when_expanding_then_substituted() {
        std::env::set_var("ORG_FIXTURE_DIR", "/srv/hr");
        assert_eq!(expand_env_vars("${ORG_FIXTURE_DIR}/org"), "/srv/hr/org");
        assert_eq!(expand_env_vars("$UNDEFINED_ORG_VAR/x"), "$UNDEFINED_ORG_VAR/x");
    }
}
