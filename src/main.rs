use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinematch_api::config::Config;
use cinematch_api::data::load_dataset;
use cinematch_api::services::providers::tmdb::TmdbProvider;
use cinematch_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let (table, matrix) = load_dataset(Path::new(&config.data_dir))?;
    let provider = TmdbProvider::new(&config)?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::build(config, table, matrix, Arc::new(provider));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
