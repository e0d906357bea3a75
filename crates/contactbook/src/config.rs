//! Configuration management for contactbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::FlatFileStore;
use crate::validation::{LineNumberPolicy, LocalityPolicy, Validator};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "contactbook";

/// Default contacts file name.
const CONTACTS_FILE_NAME: &str = "contacts.csv";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "CONTACTBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CONTACTBOOK_`)
/// 2. TOML config file at `~/.config/contactbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Validation configuration.
    pub validation: ValidationConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the contacts file.
    /// Defaults to `~/.local/share/contactbook/contacts.csv`
    pub contacts_path: Option<PathBuf>,
    /// Write through a temporary file and rename it into place.
    pub atomic_writes: bool,
}

/// Field validation policies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Policy for phone line numbers.
    pub line_number: LineNumberPolicy,
    /// Policy for area/postal codes.
    pub locality_code: LocalityPolicy,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.contacts_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "contacts_path must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Get the contacts file path, resolving defaults if not set.
    #[must_use]
    pub fn contacts_path(&self) -> PathBuf {
        self.storage
            .contacts_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(CONTACTS_FILE_NAME))
    }

    /// Build the validator for the configured policies.
    #[must_use]
    pub fn validator(&self) -> Validator {
        Validator::new(self.validation.line_number, self.validation.locality_code)
    }

    /// Build the store for the configured contacts file.
    #[must_use]
    pub fn store(&self) -> FlatFileStore {
        FlatFileStore::new(self.contacts_path()).with_atomic_writes(self.storage.atomic_writes)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.contacts_path.is_none());
        assert!(!config.storage.atomic_writes);
        assert_eq!(config.validation.line_number, LineNumberPolicy::Strict);
        assert_eq!(config.validation.locality_code, LocalityPolicy::Any);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_contacts_path() {
        let mut config = Config::default();
        config.storage.contacts_path = Some(PathBuf::new());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("contacts_path"));
    }

    #[test]
    fn test_contacts_path_default() {
        let config = Config::default();
        let path = config.contacts_path();

        assert!(path.to_string_lossy().contains("contactbook"));
        assert!(path.to_string_lossy().ends_with("contacts.csv"));
    }

    #[test]
    fn test_contacts_path_custom() {
        let mut config = Config::default();
        config.storage.contacts_path = Some(PathBuf::from("/custom/people.csv"));

        assert_eq!(config.contacts_path(), PathBuf::from("/custom/people.csv"));
        assert_eq!(config.store().path(), PathBuf::from("/custom/people.csv"));
    }

    #[test]
    fn test_store_carries_atomic_flag() {
        let mut config = Config::default();
        config.storage.atomic_writes = true;
        assert!(config.store().atomic_writes());
    }

    #[test]
    fn test_validator_uses_policies() {
        let mut config = Config::default();
        config.validation.line_number = LineNumberPolicy::Any;
        config.validation.locality_code = LocalityPolicy::Digits;

        let validator = config.validator();
        assert_eq!(validator.line_number_policy(), LineNumberPolicy::Any);
        assert_eq!(validator.locality_policy(), LocalityPolicy::Digits);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("contactbook"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    // Tests that read the environment run inside `Jail`, which serializes
    // them and restores every variable afterwards.

    fn load_in_jail(path: &str) -> std::result::Result<Config, figment::Error> {
        Config::load_from(Some(PathBuf::from(path))).map_err(|e| e.to_string().into())
    }

    #[test]
    fn test_load_nonexistent_config() {
        Jail::expect_with(|_jail| {
            // Loading from a nonexistent path should work (uses defaults)
            let config = load_in_jail("/nonexistent/config.toml")?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[storage]
contacts_path = "/srv/contacts.csv"
atomic_writes = true

[validation]
line_number = "digits"
locality_code = "digits"
"#,
            )?;

            let config = load_in_jail("config.toml")?;
            assert_eq!(config.contacts_path(), PathBuf::from("/srv/contacts.csv"));
            assert!(config.storage.atomic_writes);
            assert_eq!(config.validation.line_number, LineNumberPolicy::Digits);
            assert_eq!(config.validation.locality_code, LocalityPolicy::Digits);
            Ok(())
        });
    }

    #[test]
    fn test_load_partial_toml_keeps_other_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[validation]\nline_number = \"any\"\n")?;

            let config = load_in_jail("config.toml")?;
            assert_eq!(config.validation.line_number, LineNumberPolicy::Any);
            assert_eq!(config.validation.locality_code, LocalityPolicy::Any);
            assert_eq!(config.storage, StorageConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_unknown_policy() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[validation]\nline_number = \"fuzzy\"\n")?;

            let err = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap_err();
            assert!(matches!(err, Error::ConfigLoad(_)));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_empty_contacts_path() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[storage]\ncontacts_path = \"\"\n")?;

            let err = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap_err();
            assert!(matches!(err, Error::ConfigValidation { .. }));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        Jail::expect_with(|jail| {
            jail.set_env("CONTACTBOOK_STORAGE__CONTACTS_PATH", "/env/contacts.csv");
            jail.set_env("CONTACTBOOK_STORAGE__ATOMIC_WRITES", "true");
            jail.set_env("CONTACTBOOK_VALIDATION__LOCALITY_CODE", "digits");

            let config = load_in_jail("missing.toml")?;
            assert_eq!(config.contacts_path(), PathBuf::from("/env/contacts.csv"));
            assert!(config.storage.atomic_writes);
            assert_eq!(config.validation.locality_code, LocalityPolicy::Digits);
            assert_eq!(config.validation.line_number, LineNumberPolicy::Strict);
            Ok(())
        });
    }

    #[test]
    fn test_env_takes_precedence_over_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[storage]
contacts_path = "/srv/contacts.csv"

[validation]
line_number = "digits"
"#,
            )?;
            jail.set_env("CONTACTBOOK_STORAGE__CONTACTS_PATH", "/env/contacts.csv");

            let config = load_in_jail("config.toml")?;
            assert_eq!(config.contacts_path(), PathBuf::from("/env/contacts.csv"));
            assert_eq!(config.validation.line_number, LineNumberPolicy::Digits);
            Ok(())
        });
    }

    #[test]
    fn test_env_without_prefix_is_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("STORAGE__CONTACTS_PATH", "/elsewhere.csv");
            jail.set_env("CONTACTBOOK_STORAGE_CONTACTS_PATH", "/single-underscore.csv");

            let config = load_in_jail("missing.toml")?;
            assert!(config.storage.contacts_path.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("atomic_writes"));
        assert!(json.contains("\"line_number\":\"strict\""));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"atomic_writes": true}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert!(storage.atomic_writes);
        assert!(storage.contacts_path.is_none());
    }
}
