use anyhow::Context;
use cinema_seats::bootstrap;
use cinema_seats::config::Config;
use cinema_seats::infrastructure::http::router::build_router;
use cinema_seats::infrastructure::observability;
use cinema_seats::infrastructure::persistence::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let _observability = observability::init(&config)?;
    tracing::info!(instance_id = %config.instance_id, "Configuration loaded");

    let db = Database::connect(&config.database_url)
        .await
        .context("connecting to database")?;
    tracing::info!("Database connection established");

    db.run_migrations().await.context("running migrations")?;
    tracing::info!("Database migrations applied");

    let lock = bootstrap::build_lock(&db, &config).await?;
    let state = bootstrap::build_app_state(db, lock, config.lock_ttl);

    let app = build_router(state);

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
