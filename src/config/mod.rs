mod basic;

pub use basic::BasicConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core client configuration (see `basic` table in kanban.toml).
    #[serde(default)]
    pub basic: BasicConfig,
}

const DEFAULT_CONFIG_FILE: &str = "kanban.toml";
const ENV_PREFIX: &str = "KANBAN_";

impl Config {
    /// Builds a Figment that merges defaults, an optional TOML file and
    /// `KANBAN_`-prefixed environment variables (`__` separates nesting,
    /// e.g. `KANBAN_BASIC__API_URL`).
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration by merging defaults, `kanban.toml` if present, and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn from_optional_toml() -> Self {
        Self::load().unwrap_or_else(|err| {
            panic!("failed to extract configuration (defaults + optional kanban.toml + env): {err}")
        })
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_optional_toml);
