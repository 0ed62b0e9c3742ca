use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        Language, LatestMovieCard, MovieDetails, MovieId, PosterCard, RecommendationCard,
        LANGUAGES,
    },
    services::recommendations::{DEFAULT_POPULAR, DEFAULT_RECOMMENDATIONS},
};

use super::AppState;

/// Upper bound for `n` and `k` query parameters
pub const MAX_RESULTS: usize = 100;

// Request types

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub title: String,
    pub k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LatestQuery {
    pub language: Option<String>,
}

fn bounded(name: &str, value: Option<usize>, default: usize) -> AppResult<usize> {
    let value = value.unwrap_or(default);
    if value == 0 || value > MAX_RESULTS {
        return Err(AppError::InvalidInput(format!(
            "{} must be between 1 and {}",
            name, MAX_RESULTS
        )));
    }
    Ok(value)
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Distinct titles available for recommendation queries
pub async fn get_titles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.engine.titles().into_iter().map(str::to_string).collect())
}

/// Most popular movies of the corpus with posters
pub async fn get_popular(
    State(state): State<AppState>,
    Query(params): Query<PopularQuery>,
) -> AppResult<Json<Vec<PosterCard>>> {
    let n = bounded("n", params.n, DEFAULT_POPULAR)?;

    let movies = state
        .engine
        .most_popular(n)
        .into_iter()
        .map(|m| (m.movie_id, m.title.clone()))
        .collect();

    Ok(Json(state.metadata.poster_cards(movies).await))
}

/// Movies similar to the given title, ranked by similarity
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendQuery>,
) -> AppResult<Json<Vec<RecommendationCard>>> {
    let k = bounded("k", params.k, DEFAULT_RECOMMENDATIONS)?;

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        k = k,
        "Processing recommendation request"
    );

    let recommendations = state.engine.recommend(&params.title, k)?;

    Ok(Json(state.metadata.recommendation_cards(recommendations).await))
}

/// Detail payload of a corpus movie
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<MovieDetails>> {
    let movie_id = MovieId(movie_id);

    if state.engine.movie(movie_id).is_none() {
        return Err(AppError::MovieNotFound(format!("id {}", movie_id)));
    }

    let poster_url = state.metadata.fetch_poster(movie_id).await;
    Ok(Json(state.engine.details(movie_id, poster_url)?))
}

/// Supported languages for the latest-movies listing
pub async fn get_languages() -> Json<Vec<Language>> {
    Json(LANGUAGES.to_vec())
}

/// Recently released movies in a language, with credits
pub async fn get_latest(
    State(state): State<AppState>,
    Query(params): Query<LatestQuery>,
) -> AppResult<Json<Vec<LatestMovieCard>>> {
    let requested = params.language.as_deref().unwrap_or("English");
    let language = Language::lookup(requested)
        .ok_or_else(|| AppError::InvalidInput(format!("Unsupported language: {}", requested)))?;

    Ok(Json(state.metadata.latest_cards(language.code).await))
}
