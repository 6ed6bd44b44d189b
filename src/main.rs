use std::sync::Arc;

use bookshelf_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, PgBookStore},
    services::{
        providers::{GeminiProvider, RecommendationModel},
        recommendations::RecommendationPipeline,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let books = Arc::new(PgBookStore::new(pool));

    let model = GeminiProvider::from_config(&config)
        .map(|provider| Arc::new(provider) as Arc<dyn RecommendationModel>);
    if model.is_none() {
        tracing::warn!("AI_API_KEY not set; recommendations will report a configuration error");
    }

    let pipeline = RecommendationPipeline::new(config.heuristics());
    let state = AppState::with_pipeline(books, model, pipeline);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
