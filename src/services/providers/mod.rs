/// Remote movie metadata provider abstraction
///
/// Providers perform exactly one remote call per method and report every
/// failure as an error. Fallbacks and memoization live one level up in
/// `services::metadata`, so a provider never has to decide what to show
/// the user when the remote side misbehaves.
use crate::{
    error::AppResult,
    models::{ApiDiscoverMovie, MovieExtras, MovieId},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieDataProvider: Send + Sync {
    /// Fetch the poster path of a movie
    ///
    /// `Ok(None)` means the movie exists but has no poster.
    async fn poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>>;

    /// Fetch recently released movies in an original language (ISO 639-1 code)
    async fn latest(&self, language_code: &str) -> AppResult<Vec<ApiDiscoverMovie>>;

    /// Fetch genres, leading cast and directors of a movie
    async fn extras(&self, movie_id: MovieId) -> AppResult<MovieExtras>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
