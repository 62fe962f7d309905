//! Engine configuration
//!
//! Loaded from an optional `scaffolder.toml` and overridden by `SCAFFOLDER_*`
//! environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::directives::DEFAULT_ROOT_OWNER;
use crate::error::ConfigError;
use crate::hooks::DEFAULT_INDENT_UNIT;
use crate::naming::DEFAULT_NAMESPACE;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "scaffolder.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "SCAFFOLDER";

/// Settings shared by every scaffold operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Template roots, application root first
    pub template_roots: Vec<PathBuf>,
    /// Namespace token substituted for `account`
    pub namespace: String,
    /// Parent that triggers the root-owner conditional skip
    pub root_owner: String,
    /// Indentation added per nesting level
    pub indent_unit: String,
    /// Never warn about missing patch targets
    pub suppress_missing_file_warnings: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            template_roots: vec![PathBuf::from(".")],
            namespace: DEFAULT_NAMESPACE.to_string(),
            root_owner: DEFAULT_ROOT_OWNER.to_string(),
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            suppress_missing_file_warnings: false,
        }
    }
}

impl ScaffoldConfig {
    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::Validation("namespace must not be empty".to_string()));
        }
        if self.root_owner.trim().is_empty() {
            return Err(ConfigError::Validation("root_owner must not be empty".to_string()));
        }
        if self.indent_unit.is_empty() || !self.indent_unit.chars().all(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "indent_unit must be non-empty whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads and saves [`ScaffoldConfig`]
pub struct ConfigManager {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl ConfigManager {
    /// Look in the working directory, then the user config directory
    pub fn new() -> Self {
        let mut config_paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(user_path) = Self::user_config_path() {
            config_paths.insert(0, user_path);
        }
        Self {
            config_paths,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use one explicit config file
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_paths: vec![path],
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Override the environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scaffolder").join(CONFIG_FILE_NAME))
    }

    /// Merge defaults, config files (later files win) and the environment
    pub fn load(&self) -> Result<ScaffoldConfig, ConfigError> {
        let defaults = Config::try_from(&ScaffoldConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);
        for path in &self.config_paths {
            builder = builder.add_source(File::from(path.clone()).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("template_roots"),
        );

        let config: ScaffoldConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Write `config` as TOML to `path`
    pub fn save(&self, config: &ScaffoldConfig, path: &Path) -> Result<(), ConfigError> {
        config.validate()?;
        let toml = toml::to_string(config)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml)?;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
