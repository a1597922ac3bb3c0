pub mod cache;
pub mod config;
pub mod corpus;
pub mod metrics;
pub mod search;
pub mod sources;
pub mod store;
pub mod testing;

pub use cache::{
    CacheError, CacheStore, MemoryCacheStore, RedisCacheStore, SearchCache, ALIAS_KEY_PREFIX,
    RESULT_KEY_PREFIX,
};
pub use config::{
    load_config, load_config_from_str, validate_config, CacheBackend, Config, ConfigError,
    DatabaseConfig, SanitizedConfig, ServerConfig,
};
pub use corpus::{CorpusError, JsonFileCorpus, NameCorpus, StaticCorpus};
pub use search::{
    CharacterFilter, CharacterRecord, MediaRecord, Page, ResultSet, SearchError,
    SearchOrchestrator, SearchRequest, DEFAULT_PAGE_LIMIT,
};
pub use sources::{
    CharacterSource, MediaSource, OmdbClient, OmdbConfig, SourceError, SuperheroClient,
    SuperheroConfig, UnconfiguredSource,
};
pub use store::{ResultStore, SqliteResultStore, StoreError};
