use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hunter_core::{
    load_config, validate_config, CacheBackend, CacheStore, CharacterSource, Config,
    JsonFileCorpus, MediaSource, MemoryCacheStore, OmdbClient, RedisCacheStore, ResultStore,
    SearchCache, SearchOrchestrator, SqliteResultStore, SuperheroClient, UnconfiguredSource,
};
use hunter_server::api::create_router;
use hunter_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_tracing();

    // Determine config path
    let config_path = std::env::var("HUNTER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);
    info!("Corpus path: {:?}", config.corpus.path);

    let orchestrator = build_orchestrator(&config)?;

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), orchestrator));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Install the global subscriber. `HUNTER_LOG_FORMAT=json` switches to
/// one JSON object per line.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let json = std::env::var("HUNTER_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wire the cache, store, sources and corpus named by `config`.
fn build_orchestrator(config: &Config) -> Result<SearchOrchestrator> {
    // Create cache store
    let cache_store: Arc<dyn CacheStore> = match config.cache.backend {
        CacheBackend::Memory => {
            info!("Using in-memory cache");
            let store = Arc::new(MemoryCacheStore::new());
            store.spawn_purge_task(Duration::from_secs(config.cache.purge_interval_secs));
            store
        }
        CacheBackend::Redis => {
            let url = config
                .cache
                .redis_url
                .as_deref()
                .context("Redis cache backend selected but no redis_url provided")?;
            info!("Using Redis cache");
            Arc::new(RedisCacheStore::new(url).context("Failed to create Redis cache store")?)
        }
    };
    let cache = SearchCache::from_config(cache_store, &config.cache);

    // Create SQLite result store
    let store: Arc<dyn ResultStore> = Arc::new(
        SqliteResultStore::new(&config.database.path)
            .context("Failed to create result store")?,
    );
    info!("Result store initialized");

    // Create character source if configured
    let characters: Arc<dyn CharacterSource> = match &config.sources.superhero {
        Some(superhero_config) => {
            info!("Initializing SuperHero API client");
            Arc::new(
                SuperheroClient::new(superhero_config.clone())
                    .context("Failed to create SuperHero API client")?,
            )
        }
        None => {
            warn!("No character source configured, character searches will be empty");
            Arc::new(UnconfiguredSource::new("superhero"))
        }
    };

    // Create media source if configured
    let media: Arc<dyn MediaSource> = match &config.sources.omdb {
        Some(omdb_config) => {
            info!("Initializing OMDb client");
            Arc::new(OmdbClient::new(omdb_config.clone()).context("Failed to create OMDb client")?)
        }
        None => {
            warn!("No media source configured, media searches will be empty");
            Arc::new(UnconfiguredSource::new("omdb"))
        }
    };

    let corpus = Arc::new(JsonFileCorpus::new(&config.corpus.path));

    Ok(SearchOrchestrator::new(
        cache, store, characters, media, corpus,
    ))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
