// src/main.rs

use std::sync::Arc;
use std::time::Duration;

use bookmatch::books::{BookSource, EbooksCatalog};
use bookmatch::catalog::Catalog;
use bookmatch::config::Config;
use bookmatch::routes;
use bookmatch::state::AppState;
use bookmatch::store::{MemoryStudentStore, PgStudentStore, StudentStore};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {}", e));

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Static tables are validated before anything is served
    let catalog = Catalog::load(config.question_bank_path.as_deref())
        .and_then(|catalog| catalog.ensure_can_sample(config.question_count).map(|_| catalog))
        .unwrap_or_else(|e| {
            tracing::error!("Refusing to start: {}", e);
            panic!("Invalid quiz catalog: {}", e);
        });
    tracing::info!(
        questions = catalog.bank.len(),
        per_student = config.question_count,
        "Quiz catalog loaded"
    );

    let store: Arc<dyn StudentStore> = match &config.database_url {
        Some(database_url) => {
            let pool = connect_with_retry(database_url).await;

            // Run Migrations Automatically
            tracing::info!("Running migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Migrations applied successfully.");

            Arc::new(PgStudentStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, students are kept in memory only");
            Arc::new(MemoryStudentStore::new())
        }
    };

    let books: Arc<dyn BookSource> = Arc::new(
        EbooksCatalog::new(&config.books_base_url).expect("BOOKS_BASE_URL must be a valid URL"),
    );

    let addr = format!("{}:{}", config.host, config.port);

    // Create AppState
    let state = AppState::new(config, catalog, store, books);

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Listening on {}", addr);

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

// Initialize Database Pool with Retry
async fn connect_with_retry(database_url: &str) -> PgPool {
    let mut retry_count = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("Database connected...");
                break pool;
            }
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to connect to database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}
