use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::{
    cached,
    config::Config,
    db::{Cache, CacheKey},
    error::AppResult,
    models::{
        LatestMovie, LatestMovieCard, MovieExtras, MovieId, PosterCard, Recommendation,
        RecommendationCard,
    },
    services::providers::MovieDataProvider,
};

/// Metadata and poster fetcher
///
/// Wraps a [`MovieDataProvider`] with memoization and fallbacks. None of the
/// public methods fail: remote errors are logged here and replaced by the
/// fallback poster, an empty list or empty extras. Only successful lookups
/// are memoized.
#[derive(Clone)]
pub struct MetadataService {
    provider: Arc<dyn MovieDataProvider>,
    cache: Cache,
    workers: Arc<Semaphore>,
    image_base_url: String,
    fallback_poster: String,
}

impl MetadataService {
    pub fn new(
        provider: Arc<dyn MovieDataProvider>,
        image_base_url: String,
        fallback_poster: String,
        workers: usize,
    ) -> Self {
        Self {
            provider,
            cache: Cache::new(),
            workers: Arc::new(Semaphore::new(workers.max(1))),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            fallback_poster,
        }
    }

    pub fn from_config(provider: Arc<dyn MovieDataProvider>, config: &Config) -> Self {
        Self::new(
            provider,
            config.image_base_url.clone(),
            config.fallback_poster.clone(),
            config.fetch_workers,
        )
    }

    fn poster_url(&self, poster_path: Option<&str>) -> String {
        match poster_path {
            Some(path) if !path.is_empty() => format!("{}{}", self.image_base_url, path),
            _ => self.fallback_poster.clone(),
        }
    }

    async fn lookup_poster(&self, movie_id: MovieId) -> AppResult<Option<String>> {
        cached!(
            self.cache,
            CacheKey::Poster(movie_id),
            self.provider.poster_path(movie_id)
        )
    }

    /// Full poster URL of a movie, or the fallback poster
    pub async fn fetch_poster(&self, movie_id: MovieId) -> String {
        match self.lookup_poster(movie_id).await {
            Ok(path) => self.poster_url(path.as_deref()),
            Err(e) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Poster lookup failed, using fallback"
                );
                self.fallback_poster.clone()
            }
        }
    }

    async fn lookup_extras(&self, movie_id: MovieId) -> AppResult<MovieExtras> {
        cached!(
            self.cache,
            CacheKey::Extras(movie_id),
            self.provider.extras(movie_id)
        )
    }

    /// Genres, cast and director of a movie, empty on failure
    pub async fn fetch_details(&self, movie_id: MovieId) -> MovieExtras {
        match self.lookup_extras(movie_id).await {
            Ok(extras) => extras,
            Err(e) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Movie details lookup failed"
                );
                MovieExtras::default()
            }
        }
    }

    async fn lookup_latest(&self, language_code: &str) -> AppResult<Vec<LatestMovie>> {
        cached!(
            self.cache,
            CacheKey::Latest(language_code.to_string()),
            async {
                let results = self.provider.latest(language_code).await?;
                AppResult::Ok(
                    results
                        .into_iter()
                        .map(|m| LatestMovie {
                            poster_url: self.poster_url(m.poster_path.as_deref()),
                            id: MovieId(m.id),
                            title: m.title,
                            overview: m.overview,
                            release_date: m.release_date,
                            rating: m.vote_average,
                        })
                        .collect::<Vec<_>>(),
                )
            }
        )
    }

    /// Recently released movies in a language, empty on failure
    pub async fn fetch_latest(&self, language_code: &str) -> Vec<LatestMovie> {
        match self.lookup_latest(language_code).await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::warn!(
                    language = %language_code,
                    provider = self.provider.name(),
                    error = %e,
                    "Latest movies lookup failed"
                );
                Vec::new()
            }
        }
    }

    /// Runs one task per item on the worker pool, keeping input order
    ///
    /// Always yields one output per item: a task that panics or is cancelled
    /// is replaced by `placeholder(&item)`, computed before the task starts.
    async fn run_ordered<T, O, F, Fut, P>(&self, items: Vec<T>, task: F, placeholder: P) -> Vec<O>
    where
        T: Send + 'static,
        O: Send + 'static,
        F: Fn(Self, T) -> Fut,
        Fut: Future<Output = O> + Send + 'static,
        P: Fn(&T) -> O,
    {
        let span = tracing::Span::current();
        let mut handles = Vec::with_capacity(items.len());

        for item in items {
            let fallback = placeholder(&item);
            let workers = self.workers.clone();
            let job = task(self.clone(), item);
            let handle = tokio::spawn(
                async move {
                    // The semaphore is never closed.
                    let _permit = workers.acquire_owned().await.ok();
                    job.await
                }
                .instrument(span.clone()),
            );
            handles.push((handle, fallback));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (handle, fallback) in handles {
            match handle.await {
                Ok(output) => results.push(output),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        provider = self.provider.name(),
                        "Fetch task failed, using placeholder"
                    );
                    results.push(fallback);
                }
            }
        }
        results
    }

    /// Attaches posters to `(movie_id, title)` pairs, preserving their order
    pub async fn poster_cards(&self, movies: Vec<(MovieId, String)>) -> Vec<PosterCard> {
        self.run_ordered(
            movies,
            |service, (movie_id, title)| async move {
                let poster_url = service.fetch_poster(movie_id).await;
                PosterCard {
                    poster_url,
                    title,
                    movie_id,
                }
            },
            |(movie_id, title)| PosterCard {
                poster_url: self.fallback_poster.clone(),
                title: title.clone(),
                movie_id: *movie_id,
            },
        )
        .await
    }

    /// Attaches posters to ranked recommendations, keeping rank and score
    pub async fn recommendation_cards(
        &self,
        recommendations: Vec<Recommendation>,
    ) -> Vec<RecommendationCard> {
        self.run_ordered(
            recommendations,
            |service, recommendation| async move {
                let poster_url = service.fetch_poster(recommendation.movie_id).await;
                RecommendationCard::new(recommendation, poster_url)
            },
            |recommendation| {
                RecommendationCard::new(recommendation.clone(), self.fallback_poster.clone())
            },
        )
        .await
    }

    /// Latest movies of a language, each enriched with its extras
    pub async fn latest_cards(&self, language_code: &str) -> Vec<LatestMovieCard> {
        let movies = self.fetch_latest(language_code).await;

        self.run_ordered(
            movies,
            |service, movie| async move {
                let extras = service.fetch_details(movie.id).await;
                LatestMovieCard { movie, extras }
            },
            |movie| LatestMovieCard {
                movie: movie.clone(),
                extras: MovieExtras::default(),
            },
        )
        .await
    }
}
