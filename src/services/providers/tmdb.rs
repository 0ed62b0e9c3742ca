/// The Movie Database (TMDB) API provider
///
/// API Flow:
/// 1. Poster: {base_url}/{movie_id} → `poster_path`
/// 2. Latest: {api_root}/discover/movie filtered by original language
/// 3. Extras: {api_root}/movie/{movie_id}?append_to_response=credits
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client as HttpClient, Response};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ApiDiscoverMovie, ApiDiscoverResponse, ApiMovie, ApiMovieDetails, MovieExtras, MovieId},
    services::providers::MovieDataProvider,
};

/// Filters out unreleased movies that only have placeholder votes
const MIN_VOTE_COUNT: &str = "10";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
    api_root: String,
    region: String,
    poster_timeout: Duration,
    discover_timeout: Duration,
}

impl TmdbProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_root: config.api_root.trim_end_matches('/').to_string(),
            region: config.region.clone(),
            poster_timeout: Duration::from_secs(config.poster_timeout_secs),
            discover_timeout: Duration::from_secs(config.discover_timeout_secs),
        }
    }

    /// Turns a non-success status into an `ExternalApi` error
    async fn check_status(response: Response) -> AppResult<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl MovieDataProvider for TmdbProvider {
    async fn poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>> {
        let url = format!("{}/{}", self.base_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .timeout(self.poster_timeout)
            .send()
            .await?;

        let movie: ApiMovie = Self::check_status(response).await?.json().await?;

        tracing::debug!(
            movie_id = %movie_id,
            has_poster = movie.poster_path.is_some(),
            provider = "tmdb",
            "Poster fetched"
        );

        Ok(movie.poster_path.filter(|p| !p.is_empty()))
    }

    async fn latest(&self, language_code: &str) -> AppResult<Vec<ApiDiscoverMovie>> {
        let url = format!("{}/discover/movie", self.api_root);
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
                ("region", self.region.as_str()),
                ("with_original_language", language_code),
                ("sort_by", "primary_release_date.desc"),
                ("release_date.lte", today.as_str()),
                ("vote_count.gte", MIN_VOTE_COUNT),
                ("page", "1"),
            ])
            .timeout(self.discover_timeout)
            .send()
            .await?;

        let discover: ApiDiscoverResponse = Self::check_status(response).await?.json().await?;

        tracing::info!(
            language = %language_code,
            results = discover.results.len(),
            provider = "tmdb",
            "Latest movies fetched"
        );

        Ok(discover.results)
    }

    async fn extras(&self, movie_id: MovieId) -> AppResult<MovieExtras> {
        let url = format!("{}/movie/{}", self.api_root, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("append_to_response", "credits"),
            ])
            .timeout(self.discover_timeout)
            .send()
            .await?;

        let details: ApiMovieDetails = Self::check_status(response).await?.json().await?;

        Ok(MovieExtras::from(details))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::from_iter(vec![
            ("API_KEY".to_string(), "test_key".to_string()),
            ("BASE_URL".to_string(), "http://test.local/3/movie/".to_string()),
            ("API_ROOT".to_string(), "http://test.local/3/".to_string()),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_trims_trailing_slashes() {
        let provider = TmdbProvider::new(&test_config());
        assert_eq!(provider.base_url, "http://test.local/3/movie");
        assert_eq!(provider.api_root, "http://test.local/3");
    }

    #[test]
    fn test_timeouts_from_config() {
        let provider = TmdbProvider::new(&test_config());
        assert_eq!(provider.poster_timeout, Duration::from_secs(5));
        assert_eq!(provider.discover_timeout, Duration::from_secs(10));
        assert_eq!(provider.name(), "tmdb");
    }
}
