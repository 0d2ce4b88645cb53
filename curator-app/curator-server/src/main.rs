use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method, StatusCode};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{info, warn};

use curator_api::{build_router, AppState};
use curator_core::repositories::{CatalogBrowser, CatalogLookup, KeyValueStore};
use curator_core::services::{SessionListService, ShareOptions, ShareService};
use curator_infrastructure::{
    create_pool, spawn_sweeper, HttpIconSource, InMemoryCatalog, MemoryStore, PgCatalogRepository,
    RedisStore,
};
use curator_shared::config::{AppConfig, CatalogSource, CorsSettings, SessionStoreKind};
use curator_shared::constants::DEFAULT_QR_MIN_SIZE;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Keep the guard alive until exit so file logs are flushed
    let _log_guard = curator_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Session store
    let store: Arc<dyn KeyValueStore> = match config.sessions.store {
        SessionStoreKind::Redis => {
            info!("Using redis session store at {}", config.redis.url);
            Arc::new(RedisStore::new(&config.redis.url, config.redis.max_connections)?)
        }
        SessionStoreKind::Memory => {
            warn!("Using in-process session store; sessions are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    // Catalog
    let (lookup, browser): (Arc<dyn CatalogLookup>, Arc<dyn CatalogBrowser>) = match config.catalog.source {
        CatalogSource::Postgres => {
            let pool = create_pool(
                &config.database.url,
                config.database.max_connections,
                Duration::from_secs(config.database.acquire_timeout_seconds),
            )?;
            let repo = Arc::new(PgCatalogRepository::new(pool));
            if let Err(e) = repo.ping().await {
                warn!("Catalog database not reachable yet: {}", e);
            }
            (repo.clone() as Arc<dyn CatalogLookup>, repo as Arc<dyn CatalogBrowser>)
        }
        CatalogSource::File => {
            let catalog = Arc::new(InMemoryCatalog::load(&config.catalog.seed_path).await?);
            (catalog.clone() as Arc<dyn CatalogLookup>, catalog as Arc<dyn CatalogBrowser>)
        }
    };

    // Services
    let sessions = Arc::new(SessionListService::new(
        store.clone(),
        lookup,
        Duration::from_secs(config.sessions.ttl_seconds),
        config.sessions.key_prefix.clone(),
    ));

    let icon_timeout = Duration::from_millis(config.export.icon_timeout_ms);
    let icons = Arc::new(HttpIconSource::new(icon_timeout, config.export.max_icon_bytes)?);
    let share = Arc::new(ShareService::new(
        sessions.clone(),
        icons,
        ShareOptions {
            frontend_url: config.share.frontend_url.clone(),
            embed_width: config.share.embed_width,
            embed_height: config.share.embed_height,
            icon_timeout,
            qr_min_size: DEFAULT_QR_MIN_SIZE,
        },
    )?);

    let sweeper = match config.sessions.sweep_interval_seconds {
        0 => {
            info!("Session sweeper disabled");
            None
        }
        secs => Some(spawn_sweeper(
            store.clone(),
            config.sessions.key_prefix.clone(),
            Duration::from_secs(secs),
        )),
    };

    let state = AppState {
        sessions,
        share,
        catalog: browser,
        store,
        inline_icons: config.export.inline_icons,
    };

    let app = build_router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.app.request_timeout_seconds),
        ))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(sweeper) = sweeper {
        sweeper.shutdown().await;
    }
    info!("Server stopped");

    Ok(())
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if settings.allowed_origins.iter().any(|o| o.trim() == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
