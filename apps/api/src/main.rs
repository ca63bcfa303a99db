use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bookshelf_api::config::DEFAULT_LOG_FILTER;
use bookshelf_api::{
    app_router, build_schema, Config, DocumentStore, MemoryDocumentStore, PgDocumentStore,
    StoreBackend, StoreRegistry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_new(config.log_filter());
    let filter_rejected = filter.is_err();
    tracing_subscriber::registry()
        .with(filter.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if filter_rejected {
        tracing::warn!(
            filter = config.log_filter(),
            "Invalid log filter, falling back to {}",
            DEFAULT_LOG_FILTER
        );
    }

    tracing::info!(
        environment = %config.common.environment,
        store = %config.store_backend,
        "Starting Bookshelf API server on port {}",
        config.port
    );

    let store = connect_store(&config).await?;
    let registry = StoreRegistry::new(store);
    tracing::info!(backend = registry.backend(), "Document store ready");

    let schema = build_schema(registry.clone());
    let app = app_router(schema, registry, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    if config.graphiql {
        tracing::info!(
            "GraphiQL available at http://{}:{}/graphql",
            addr.ip(),
            addr.port()
        );
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Open the configured document store backend
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        StoreBackend::Postgres => {
            let database = config.database();
            tracing::info!("Connecting to database...");

            let pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .min_connections(database.min_connections)
                .acquire_timeout(database.connect_timeout)
                .idle_timeout(database.idle_timeout)
                .connect(&database.url)
                .await?;

            tracing::info!("Database connection established");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Migrations completed successfully");

            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
    }
}
