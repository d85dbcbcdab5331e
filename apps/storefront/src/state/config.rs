//! # Configuration State
//!
//! Stores storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPTOSHOP_*`)
//! 2. Config file (`SHOPTOSHOP_CONFIG`, TOML)
//! 3. Defaults (this file)
//!
//! ```toml
//! # storefront.toml
//! store_name = "ShopToShop Lisboa"
//! default_language = "pt"
//! autosave = true
//! session_path = "/var/lib/shoptoshop/session.json"
//! max_price_filter_cents = 50000
//! catalog_path = "/etc/shoptoshop/products.json"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! The active language lives in `LocaleState`, which can change at runtime.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shoptoshop_core::Language;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "SHOPTOSHOP_CONFIG";

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (header and page titles)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Language used until the shopper picks another
    pub default_language: Language,

    /// Where the session is saved. `None` keeps it in memory only.
    pub session_path: Option<PathBuf>,

    /// Save the session after every change
    pub autosave: bool,

    /// Upper end of the shop page price slider, in cents
    pub max_price_filter_cents: i64,

    /// JSON catalog to load instead of the bundled sample
    pub catalog_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "ShopToShop"
    /// - Currency: $ with 2 decimals
    /// - Language: English
    /// - Session: platform data dir, autosaved
    /// - Price slider: 0 – 500.00
    /// - Catalog: bundled sample
    fn default() -> Self {
        ConfigState {
            store_name: "ShopToShop".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            default_language: Language::En,
            session_path: shoptoshop_session::default_session_path(),
            autosave: true,
            max_price_filter_cents: 50_000,
            catalog_path: None,
        }
    }
}

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Shape of the TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    store_name: Option<String>,
    currency_symbol: Option<String>,
    currency_decimals: Option<u8>,
    default_language: Option<String>,
    session_path: Option<PathBuf>,
    autosave: Option<bool>,
    max_price_filter_cents: Option<i64>,
    catalog_path: Option<PathBuf>,
}

impl ConfigState {
    /// Loads configuration from the environment, the config file it points
    /// at, and defaults. Falls back to defaults when loading fails.
    pub fn from_env() -> Self {
        Self::load(|key| std::env::var(key).ok()).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Loads configuration using `env` to read variables.
    pub fn load<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(path) = env(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            info!(?path, "Loading storefront config from file");
            config.apply_file(&read_config_file(&path)?)?;
        }

        config.apply_env_overrides(&env);
        config.validate()?;
        Ok(config)
    }

    /// Applies a TOML document on top of the current values.
    pub fn apply_toml(&mut self, contents: &str) -> Result<(), ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;
        self.apply_file(&file)
    }

    fn apply_file(&mut self, file: &ConfigFile) -> Result<(), ConfigError> {
        if let Some(name) = &file.store_name {
            self.store_name = name.clone();
        }
        if let Some(symbol) = &file.currency_symbol {
            self.currency_symbol = symbol.clone();
        }
        if let Some(decimals) = file.currency_decimals {
            self.currency_decimals = decimals;
        }
        if let Some(code) = &file.default_language {
            self.default_language = code
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("default_language: {}", e)))?;
        }
        if let Some(path) = &file.session_path {
            self.session_path = Some(path.clone());
        }
        if let Some(autosave) = file.autosave {
            self.autosave = autosave;
        }
        if let Some(max) = file.max_price_filter_cents {
            self.max_price_filter_cents = max;
        }
        if let Some(path) = &file.catalog_path {
            self.catalog_path = Some(path.clone());
        }
        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_env_overrides<F>(&mut self, env: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = env("SHOPTOSHOP_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(code) = env("SHOPTOSHOP_LANGUAGE") {
            match Language::parse(&code) {
                Some(lang) => {
                    debug!(language = %lang, "Overriding default language from environment");
                    self.default_language = lang;
                }
                None => warn!(value = %code, "Unknown language in environment"),
            }
        }

        if let Some(path) = env("SHOPTOSHOP_SESSION_PATH") {
            // An empty value turns persistence off.
            self.session_path = (!path.trim().is_empty()).then(|| PathBuf::from(path));
        }

        if let Some(path) = env("SHOPTOSHOP_CATALOG") {
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(value) = env("SHOPTOSHOP_AUTOSAVE") {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.autosave = true,
                "0" | "false" | "no" | "off" => self.autosave = false,
                _ => warn!(value = %value, "Unknown autosave flag in environment"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }
        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(
                "currency_decimals must be between 0 and 4".into(),
            ));
        }
        if self.max_price_filter_cents <= 0 {
            return Err(ConfigError::Invalid(
                "max_price_filter_cents must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Formats a cent amount as a currency string.
    ///
    /// Amounts are always integer cents. With `currency_decimals` other than
    /// 2 the value is rescaled: extra places are zero-filled, fewer places
    /// round half up (away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use shoptoshop_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let decimals = u32::from(self.currency_decimals);
        let magnitude = i128::from(cents).abs();

        // Amount in units of 10^-decimals
        let units = if decimals >= 2 {
            magnitude * 10_i128.pow(decimals - 2)
        } else {
            let step = 10_i128.pow(2 - decimals);
            (magnitude + step / 2) / step
        };

        let divisor = 10_i128.pow(decimals);
        let whole = units / divisor;
        let frac = units % divisor;
        let sign = if cents < 0 && units != 0 { "-" } else { "" };

        if decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency_symbol,
                whole,
                frac,
                width = usize::from(self.currency_decimals)
            )
        } else {
            format!("{}{}{}", sign, self.currency_symbol, whole)
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}
