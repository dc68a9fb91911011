use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use tasknest::cli::Cli;
use tasknest::logging::init_tracing;
use tasknest::router::init_router;
use tasknest::state::AppState;
use tasknest_config::{JwtConfig, ServerConfig};
use tasknest_db::init_db_pool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Cli::parse().apply(ServerConfig::from_env());
    init_tracing(&config.log_dir).context("failed to initialize tracing")?;

    let db = init_db_pool(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    let state = AppState::from_pool(db, JwtConfig::from_env());
    let app = init_router(state, &config.assets_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "🚀 Server running");

    axum::serve(listener, app).await?;

    Ok(())
}
