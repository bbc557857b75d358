use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::Phase;
use crate::error::{GbrowseError, Result};
use crate::git::command::DEFAULT_GIT;

/// Environment variable naming the git executable
pub const ENV_GIT: &str = "GBROWSE_GIT";
/// Environment variable enabling debug logs when non-empty
pub const ENV_DEBUG: &str = "GBROWSE_DEBUG";
/// Environment variable holding inline JSON or a config path
pub const ENV_CONFIG: &str = "GBROWSE_CONFIG";

/// Represents the complete configuration for gbrowse.
///
/// `phases` is the resolution order; `defs` maps custom phase ids to commands.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub phases: Vec<Phase>,

    #[serde(default, rename = "defs")]
    pub definitions: Vec<Definition>,
}

/// An external command that resolves a custom phase
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Definition {
    pub id: String,

    /// Program followed by its arguments
    #[serde(rename = "cmd")]
    pub command: Vec<String>,
}

impl Config {
    pub fn from_json(value: &str) -> Result<Self> {
        serde_json::from_str(value).map_err(|e| GbrowseError::config(format!("invalid JSON: {}", e)))
    }

    pub fn from_toml(value: &str) -> Result<Self> {
        toml::from_str(value).map_err(|e| GbrowseError::config(format!("invalid TOML: {}", e)))
    }

    /// Read a config file; `.toml` files are TOML, everything else JSON
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Replace the phases, keeping the definitions
    pub fn with_phases(mut self, phases: Option<Vec<Phase>>) -> Self {
        if let Some(phases) = phases {
            self.phases = phases;
        }
        self
    }
}

/// Parse `value` as inline JSON, or else as a path to a config file.
///
/// Returns `base` (or the default config) when `value` is empty or neither
/// form can be read.
pub fn parse_string_or_file(value: &str, base: Option<Config>) -> Config {
    let value = value.trim();
    if value.is_empty() {
        return base.unwrap_or_default();
    }

    let inline_err = match Config::from_json(value) {
        Ok(config) => return config,
        Err(e) => e,
    };

    match Config::from_file(Path::new(value)) {
        Ok(config) => config,
        Err(file_err) => {
            warn!(
                value,
                inline = %inline_err,
                file = %file_err,
                "ignoring config that is neither JSON nor a readable file"
            );
            base.unwrap_or_default()
        }
    }
}

/// Location of the per-user config file, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gbrowse").join("config.json"))
}

/// Where configuration comes from, lowest precedence first
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub default_file: Option<PathBuf>,
    pub env: Option<String>,
    pub flag: Option<String>,
}

/// Loads configuration from the layered sources.
///
/// 1. the default file, if it exists
/// 2. `GBROWSE_CONFIG`
/// 3. `--config`
///
/// Each set and valid layer replaces the one below it.
pub fn load_config(sources: &ConfigSources) -> Config {
    let mut config = Config::default();

    if let Some(path) = sources.default_file.as_deref().filter(|p| p.is_file()) {
        match Config::from_file(path) {
            Ok(loaded) => config = loaded,
            Err(e) => warn!(path = %path.display(), error = %e, "ignoring default config file"),
        }
    }
    if let Some(env) = sources.env.as_deref() {
        config = parse_string_or_file(env, Some(config));
    }
    if let Some(flag) = sources.flag.as_deref() {
        config = parse_string_or_file(flag, Some(config));
    }

    debug!(?config, "config");
    config
}

/// Settings read from the process environment
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    /// git executable
    pub git: String,
    pub debug: bool,
    /// inline JSON or path
    pub config: Option<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            git: DEFAULT_GIT.to_string(),
            debug: false,
            config: None,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        EnvConfig {
            git: get(ENV_GIT).unwrap_or_else(|| DEFAULT_GIT.to_string()),
            debug: get(ENV_DEBUG).is_some(),
            config: get(ENV_CONFIG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_defaults() {
        let env = EnvConfig::from_lookup(|_| None);
        assert_eq!(env, EnvConfig::default());
        assert_eq!(env.git, "git");
    }

    #[test]
    fn test_env_values() {
        let vars: HashMap<&str, &str> = [
            (ENV_GIT, "/usr/local/bin/git"),
            (ENV_DEBUG, "1"),
            (ENV_CONFIG, r#"{"phases":["tag"]}"#),
        ]
        .into_iter()
        .collect();
        let env = EnvConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(env.git, "/usr/local/bin/git");
        assert!(env.debug);
        assert_eq!(env.config.as_deref(), Some(r#"{"phases":["tag"]}"#));
    }

    #[test]
    fn test_env_empty_is_unset() {
        let env = EnvConfig::from_lookup(|_| Some(String::new()));
        assert_eq!(env, EnvConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = Config::from_json(r#"{"phases":["commit"],"extra":1}"#).unwrap();
        assert_eq!(config.phases, vec![Phase::new("commit")]);
    }

    #[test]
    fn test_with_phases() {
        let config = Config {
            phases: vec![Phase::new("tag")],
            definitions: vec![Definition {
                id: "x".to_string(),
                command: vec!["pwd".to_string()],
            }],
        };
        let overridden = config.clone().with_phases(Some(vec![Phase::new("branch")]));
        assert_eq!(overridden.phases, vec![Phase::new("branch")]);
        assert_eq!(overridden.definitions, config.definitions);
        assert_eq!(config.clone().with_phases(None), config);
    }
}
