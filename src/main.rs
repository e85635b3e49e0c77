use axum::routing::post;
use axum::Router;
use tracing_subscriber::EnvFilter;

use vraagbaak::api;
use vraagbaak::config::Config;
use vraagbaak::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Missing provider configuration fails here, before the listener opens.
    let config = Config::from_env()?;
    tracing::info!(
        "Completion deployment: {} (embeddings: {})",
        config.llm.completion_deployment,
        config.llm.embedding_deployment
    );
    tracing::info!("Search index: {}", config.search.index_name);

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        .route("/api/ask", post(api::ask::ask))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
