//! Configuration management for gcpctl
//!
//! Handles configuration loading from files and environment variables.
//! Configuration is stored in TOML format with support for multiple named profiles.

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};
use super::polling::PollingConfig;
use crate::api::ApiTrack;
use crate::scope::ScopeDefaults;

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when `--profile` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Individual profile configuration
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Default region for regional resources such as spokes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Default cluster location (zone or region)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    /// OAuth2 bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub api_track: ApiTrack,
    #[serde(default)]
    pub endpoints: EndpointOverrides,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Per-service API endpoint overrides
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct EndpointOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_connectivity: Option<String>,
}

impl Profile {
    /// Ambient scope values this profile provides to resource resolution
    pub fn scope_defaults(&self) -> ScopeDefaults {
        ScopeDefaults {
            project: self.project.clone(),
            location: self.location.clone(),
            zone: self.zone.clone(),
            region: self.region.clone(),
            cluster: self.cluster.clone(),
        }
    }
}

impl Config {
    /// Resolve which profile to use
    ///
    /// Order: explicit name, `default_profile`, then the alphabetically first
    /// profile. Returns `None` when no profiles are configured at all.
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<Option<String>> {
        if let Some(name) = explicit_profile {
            if !self.profiles.contains_key(name) {
                return Err(ConfigError::ProfileNotFound {
                    name: name.to_string(),
                });
            }
            return Ok(Some(name.to_string()));
        }

        if let Some(ref default) = self.default_profile {
            if !self.profiles.contains_key(default) {
                return Err(ConfigError::ProfileNotFound {
                    name: default.clone(),
                });
            }
            return Ok(Some(default.clone()));
        }

        Ok(self.profile_names().first().map(|name| name.to_string()))
    }

    /// The profile to use, or an empty profile when none is configured
    pub fn active_profile(&self, explicit_profile: Option<&str>) -> Result<Profile> {
        Ok(self
            .resolve_profile(explicit_profile)?
            .and_then(|name| self.profiles.get(&name).cloned())
            .unwrap_or_default())
    }

    /// All profile names sorted alphabetically
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.profiles.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        // Expand environment variables in the config content
        let expanded_content = Self::expand_env_vars(&content);

        let config: Config = toml::from_str(&expanded_content)?;

        Ok(config)
    }

    /// Get the path to the configuration file
    ///
    /// On macOS, `~/.config/gcpctl/config.toml` is preferred when it (or its
    /// directory) exists, falling back to the platform standard location.
    ///
    /// On Linux: ~/.config/gcpctl/config.toml
    /// On Windows: %APPDATA%\gcpctl\gcpctl\config\config.toml
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_path = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("gcpctl")
                    .join("config.toml");

                if linux_style_path.exists()
                    || linux_style_path
                        .parent()
                        .map(|p| p.exists())
                        .unwrap_or(false)
                {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs =
            ProjectDirs::from("com", "gcpctl", "gcpctl").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand environment variables in configuration content
    ///
    /// Supports ${VAR} and ${VAR:-default} syntax. Unset variables without a
    /// default are left as-is so unused profiles don't fail to load.
    ///
    /// Example:
    /// ```toml
    /// access_token = "${GCPCTL_ACCESS_TOKEN}"
    /// region = "${GCPCTL_REGION:-us-central1}"
    /// ```
    fn expand_env_vars(content: &str) -> String {
        let expanded =
            shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok());
        expanded.to_string()
    }
}
