use std::net::SocketAddr;
use std::sync::Arc;

use agentic_platform::{
    app,
    config::{get_config, init_config},
    database::pool::create_pool,
    storage::postgres::PostgresCandidateStore,
    AppState, SERVICE_NAME,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = Arc::new(PostgresCandidateStore::new(pool));
    let app_state = AppState::new(store);
    let router = app(app_state);

    let addr: SocketAddr = config.server_address().parse()?;
    info!("{} listening on {}", SERVICE_NAME, addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("{} shut down", SERVICE_NAME);

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
