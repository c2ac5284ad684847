use std::sync::Arc;

use anyhow::Context;
use coach_api::{config::ServerConfig, routes, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().context("loading server config")?;
    let state = Arc::new(AppState::from_config(&config).context("building upstream http client")?);

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, upstream = %config.openai_base_url, "coach api listening");
    axum::serve(listener, app).await.context("serving http")?;
    Ok(())
}
