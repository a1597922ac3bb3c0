use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "HUNTER_";

/// Read `path` and layer `HUNTER_*` environment variables on top.
///
/// Sections nest with a double underscore, so secrets can stay out of the
/// file: `HUNTER_SOURCES__SUPERHERO__ACCESS_TOKEN` fills
/// `sources.superhero.access_token` and `HUNTER_CACHE__REDIS_URL` fills
/// `cache.redis_url`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    figment(path)
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Parse a TOML document without consulting the environment.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
