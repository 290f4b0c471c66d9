use orggate::{
    api::{build_router, AppState},
    init_tracing,
    storage::{create_pool, run_migrations},
    Config, Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    let _ = dotenvy::dotenv();

    init_tracing();

    info!(app_name = APP_NAME, version = VERSION, "Starting orggate identity service");

    let config = Config::from_env()?;

    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;

    let state = AppState::new(pool, &config.auth);
    let router = build_router(state);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| orggate::Error::config(format!("Failed to bind {}: {}", addr, e)))?;

    info!(%addr, "HTTP server listening");
    axum::serve(listener, router)
        .await
        .map_err(|e| orggate::Error::internal(format!("Server error: {}", e)))?;

    Ok(())
}
