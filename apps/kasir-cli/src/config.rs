//! # Shell Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KASIR_STORE_NAME="Warung Bu Sri"                                   │
//! │     KASIR_LOG=debug                                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>  or  KASIR_CONFIG=<path>                           │
//! │     else ~/.config/kasir/kasir.toml (Linux)                            │
//! │          ~/Library/Application Support/com.kasir.kasir/kasir.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     store "Kasir", log filter "warn", standard discount tiers          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Warung Bu Sri"
//!
//! [log]
//! filter = "kasir=debug"
//!
//! # Replaces the standard 10% / 8% / 5% schedule when present.
//! [[discount.tiers]]
//! threshold = "1000000"
//! rate = "0.12"
//!
//! [[discount.tiers]]
//! threshold = "250000"
//! rate = "0.04"
//! ```

use std::path::{Path, PathBuf};

use kasir_core::{DiscountSchedule, DiscountTier, ValidationError};
use serde::Deserialize;
use thiserror::Error;

/// Default log filter when neither `RUST_LOG`, `KASIR_LOG` nor the file set one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

const DEFAULT_STORE_NAME: &str = "Kasir";
const CONFIG_FILE_NAME: &str = "kasir.toml";

// =============================================================================
// Errors
// =============================================================================

/// Problems loading configuration. These are the only fatal errors of the app.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid discount tiers: {0}")]
    Discount(#[from] ValidationError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// File Layout
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    store: StoreSection,
    log: LogSection,
    discount: DiscountSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StoreSection {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LogSection {
    filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DiscountSection {
    tiers: Option<Vec<DiscountTier>>,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Settings the console session runs with.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Shown in the menu banner.
    pub store_name: String,

    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Discount tiers for the price breakdown.
    pub discount: DiscountSchedule,

    /// File the settings came from, if any.
    pub source: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            store_name: DEFAULT_STORE_NAME.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            discount: DiscountSchedule::standard(),
            source: None,
        }
    }
}

impl ShellConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Arguments
    /// * `explicit` - Path given on the command line. Must exist when set.
    ///
    /// Without an explicit path, `KASIR_CONFIG` and then the platform config
    /// directory are tried; a missing default file just means defaults.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let env_path = std::env::var_os("KASIR_CONFIG").map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse_toml(&contents, path)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses TOML text that did not come from a file.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Self::parse_toml(contents, Path::new("<inline>"))
    }

    fn parse_toml(contents: &str, path: &Path) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let defaults = Self::default();

        let discount = match file.discount.tiers {
            Some(tiers) => DiscountSchedule::new(tiers)?,
            None => defaults.discount,
        };

        Ok(ShellConfig {
            store_name: file.store.name.unwrap_or(defaults.store_name),
            log_filter: file.log.filter.unwrap_or(defaults.log_filter),
            discount,
            source: None,
        })
    }

    /// Applies `KASIR_STORE_NAME` and `KASIR_LOG` from `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("KASIR_STORE_NAME").filter(|s| !s.trim().is_empty()) {
            self.store_name = name;
        }

        if let Some(filter) = lookup("KASIR_LOG").filter(|s| !s.trim().is_empty()) {
            self.log_filter = filter;
        }
    }

    /// Platform config location of `kasir.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "kasir", "kasir")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::Money;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.store_name, "Kasir");
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.discount, DiscountSchedule::standard());
    }

    #[test]
    fn test_empty_file_means_defaults() {
        let config = ShellConfig::from_toml_str("").unwrap();
        assert_eq!(config.store_name, "Kasir");
        assert_eq!(config.discount, DiscountSchedule::standard());
    }

    #[test]
    fn test_full_file() {
        let config = ShellConfig::from_toml_str(
            r#"
            [store]
            name = "Warung Bu Sri"

            [log]
            filter = "kasir=debug"

            [[discount.tiers]]
            threshold = "250000"
            rate = "0.04"

            [[discount.tiers]]
            threshold = "1000000"
            rate = "0.12"
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Warung Bu Sri");
        assert_eq!(config.log_filter, "kasir=debug");
        let tiers = config.discount.tiers();
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].threshold, Money::from_major(1_000_000));
        assert_eq!(
            config.discount.discount_for(Money::from_major(300_000)),
            Money::from_major(12_000)
        );
    }

    #[test]
    fn test_bad_rate_is_rejected() {
        let err = ShellConfig::from_toml_str(
            r#"
            [[discount.tiers]]
            threshold = "100"
            rate = "2"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Discount(_)));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ShellConfig::from_toml_str("[store]\ncolour = \"red\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ShellConfig::default();
        config.apply_env_overrides(|key| match key {
            "KASIR_STORE_NAME" => Some("Toko Maju".to_string()),
            "KASIR_LOG" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.store_name, "Toko Maju");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_from_file_records_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store]\nname = \"Toko Maju\"").unwrap();

        let config = ShellConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store_name, "Toko Maju");
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = ShellConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
