//! # stride-config
//!
//! Layered configuration loading for Stride using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STRIDE_*` prefix, `__` as separator)
//! 2. Project-level `.stride/config.toml`
//! 3. User-level `~/.config/stride/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `STRIDE_DATABASE__PATH` -> `database.path`,
//! `STRIDE_SITE__FRONTEND_URL` -> `site.frontend_url`, etc.
//!
//! ```no_run
//! use stride_config::StrideConfig;
//!
//! let config = StrideConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod site;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use site::SiteConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StrideConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl StrideConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load `.env` from the current directory, then load configuration.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".stride/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("STRIDE_").split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.site.is_configured()
            && !(self.site.frontend_url.starts_with("http://")
                || self.site.frontend_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "site.frontend_url".into(),
                reason: format!("'{}' is not an http(s) URL", self.site.frontend_url),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stride").join("config.toml"))
    }
}
