//! Configuration module for fdb
//!
//! Holds the server address, the account cookie and listing defaults.
//! Configuration is stored in the user's config directory
//! (`~/.config/filedb-client/config.toml` on Linux); any key can be
//! overridden from the environment with an `FDB_` prefix, e.g.
//! `FDB_SERVER_URL`.

mod setup;

pub use setup::first_time_setup;

use crate::api::SortMethod;
use crate::api::query::{DEFAULT_COUNT, validate_count};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Server address used when none is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5555";

/// Keys accepted by `fdb config set` and `fdb config get`
pub const KEYS: [&str; 6] = [
    "server_url",
    "account_cookie",
    "quiet",
    "page_size",
    "default_sort",
    "sort_reverse",
];

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

const fn default_page_size() -> u32 {
    DEFAULT_COUNT
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FdbConfig {
    /// Base URL of the FileDb server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Value of the `filedb_account` cookie, if the server requires login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_cookie: Option<String>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Results per page for searches
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub default_sort: SortMethod,

    #[serde(default)]
    pub sort_reverse: bool,
}

impl Default for FdbConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            account_cookie: None,
            quiet: false,
            page_size: default_page_size(),
            default_sort: SortMethod::None,
            sort_reverse: false,
        }
    }
}

impl FdbConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("filedb-client").join("config.toml"))
    }

    /// Load configuration, creating a default file if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, layered under `FDB_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or a value is invalid.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("FDB"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_count(self.page_size)
            .map_err(|e| ConfigError::Message(format!("Invalid page_size: {e}")))
    }

    /// Set a key from its string form
    ///
    /// An empty `account_cookie` clears the cookie.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value that doesn't parse.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "server_url" => {
                if value.is_empty() {
                    return Err(ConfigError::Message("server_url cannot be empty".into()));
                }
                self.server_url = value.trim_end_matches('/').to_string();
            }
            "account_cookie" => {
                self.account_cookie = (!value.is_empty()).then(|| value.to_string());
            }
            "quiet" => self.quiet = parse_bool(key, value)?,
            "sort_reverse" => self.sort_reverse = parse_bool(key, value)?,
            "page_size" => {
                let size = value.parse::<u32>().map_err(|_| {
                    ConfigError::Message(format!("Invalid value for page_size: '{value}'"))
                })?;
                validate_count(size)
                    .map_err(|e| ConfigError::Message(format!("Invalid page_size: {e}")))?;
                self.page_size = size;
            }
            "default_sort" => {
                self.default_sort = value
                    .parse()
                    .map_err(|e| ConfigError::Message(format!("Invalid default_sort: {e}")))?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// String form of a key's value
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "server_url" => self.server_url.clone(),
            "account_cookie" => self.account_cookie.clone().unwrap_or_default(),
            "quiet" => self.quiet.to_string(),
            "page_size" => self.page_size.to_string(),
            "default_sort" => self.default_sort.to_string(),
            "sort_reverse" => self.sort_reverse.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| {
        ConfigError::Message(format!(
            "Invalid value for {key}: '{value}'. Use 'true' or 'false'"
        ))
    })
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::Message(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        KEYS.join(", ")
    ))
}
