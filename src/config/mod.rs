mod basic;
mod services;

pub use basic::BasicConfig;
pub use services::{ModelConfig, ServicesConfig, WorkspaceHostConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// External service endpoints (see `services` table in config.toml).
    #[serde(default)]
    pub services: ServicesConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "APPDOCK_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file,
    /// and `APPDOCK_`-prefixed environment variables (e.g.
    /// `APPDOCK_BASIC__DATABASE_URL`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration by merging defaults, `config.toml` if present, and
    /// environment overrides.
    pub fn load() -> Self {
        Self::figment().extract().unwrap_or_else(|err| {
            panic!("failed to extract configuration (defaults + optional config.toml + env): {err}")
        })
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn defaults_extract_cleanly() {
        let cfg = Config::default();
        assert_eq!(cfg.basic.database_url, "sqlite://appdock.db");
        assert_eq!(cfg.basic.loglevel, "info");
        assert_eq!(cfg.services.model.model, "claude-code");
        assert_eq!(cfg.services.model.api_key, "dummy-key");
    }
}
