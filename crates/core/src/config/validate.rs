use super::{types::Config, CacheBackend, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Cache TTLs are non-zero and aliases outlive result sets
/// - The memory sweep interval is not 0
/// - Redis backend has a URL
/// - Default page size is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Cache validation
    if config.cache.result_ttl_secs == 0 || config.cache.alias_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache TTLs must be greater than 0".to_string(),
        ));
    }
    if config.cache.alias_ttl_secs < config.cache.result_ttl_secs {
        return Err(ConfigError::ValidationError(
            "cache.alias_ttl_secs cannot be shorter than cache.result_ttl_secs".to_string(),
        ));
    }
    if config.cache.purge_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache.purge_interval_secs cannot be 0".to_string(),
        ));
    }
    if config.cache.backend == CacheBackend::Redis
        && config.cache.redis_url.as_deref().unwrap_or("").is_empty()
    {
        return Err(ConfigError::ValidationError(
            "cache.redis_url must be set when backend = \"redis\"".to_string(),
        ));
    }

    if config.search.default_limit == 0 {
        return Err(ConfigError::ValidationError(
            "search.default_limit cannot be 0".to_string(),
        ));
    }

    Ok(())
}
