use shareit::{
    adapters::memory::MemoryStore,
    adapters::postgres::{
        PostgresBookingRepository, PostgresCommentRepository, PostgresItemRepository,
        PostgresItemRequestRepository, PostgresUserRepository,
    },
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
    config::AppConfig,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let service_deps = match config.database.url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Connected to PostgreSQL and applied migrations");

            ServiceDependencies {
                users: Arc::new(PostgresUserRepository::new(pool.clone())),
                items: Arc::new(PostgresItemRepository::new(pool.clone())),
                bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
                comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
                requests: Arc::new(PostgresItemRequestRepository::new(pool)),
            }
        }
        None => {
            tracing::warn!("No database URL configured; data is kept in memory only");
            let store = Arc::new(MemoryStore::new());
            ServiceDependencies {
                users: store.clone(),
                items: store.clone(),
                bookings: store.clone(),
                comments: store.clone(),
                requests: store,
            }
        }
    };

    let app_state = Arc::new(AppState { service_deps });
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
