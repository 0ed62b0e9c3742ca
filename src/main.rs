use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_recs_api::{
    api::{create_router, AppState},
    config::Config,
    db,
    services::{MetadataService, RecommendationEngine, TmdbProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recs_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Corpus load and similarity build are CPU bound and fatal on failure
    let corpus_path = config.corpus_path.clone();
    let max_features = config.max_features;
    let engine = tokio::task::spawn_blocking(move || -> anyhow::Result<RecommendationEngine> {
        let movies = db::load_corpus(&corpus_path)?;
        Ok(RecommendationEngine::build(movies, max_features)?)
    })
    .await
    .context("Similarity engine build task panicked")?
    .context("Failed to build similarity engine")?;

    tracing::info!(
        movies = engine.movie_count(),
        vocabulary = engine.vocabulary_len(),
        corpus = %config.corpus_path,
        "Recommendation engine ready"
    );

    let provider = Arc::new(TmdbProvider::new(&config));
    let metadata = MetadataService::from_config(provider, &config);

    let app = create_router(AppState::new(engine, metadata));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server running");

    axum::serve(listener, app).await?;
    Ok(())
}
