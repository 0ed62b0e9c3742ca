use std::collections::HashMap;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieId, MovieRecord, Recommendation},
    services::{similarity::SimilarityMatrix, vectorizer::TermVectorSpace},
};

pub const DEFAULT_RECOMMENDATIONS: usize = 10;
pub const DEFAULT_POPULAR: usize = 10;

/// Content-similarity recommendation engine
///
/// Owns the corpus together with its term vectors and similarity matrix, so
/// row indices stay aligned for the engine's whole lifetime. A changed corpus
/// requires building a new engine.
#[derive(Debug)]
pub struct RecommendationEngine {
    movies: Vec<MovieRecord>,
    space: TermVectorSpace,
    matrix: SimilarityMatrix,
    /// Exact title -> first row with that title
    title_index: HashMap<String, usize>,
    id_index: HashMap<MovieId, usize>,
}

impl RecommendationEngine {
    /// Vectorizes the corpus tags and computes the similarity matrix
    ///
    /// Fails with `EmptyCorpus` when there is nothing to index.
    pub fn build(movies: Vec<MovieRecord>, max_features: usize) -> AppResult<Self> {
        if movies.is_empty() {
            return Err(AppError::EmptyCorpus);
        }

        let start = Instant::now();

        let tags: Vec<&str> = movies.iter().map(|m| m.tags.as_str()).collect();
        let space = TermVectorSpace::fit(&tags, max_features);
        let matrix = SimilarityMatrix::build(&space);

        let degenerate = space.degenerate_rows();
        if !degenerate.is_empty() {
            tracing::warn!(
                count = degenerate.len(),
                first_title = %movies[degenerate[0]].title,
                "Movies without any vocabulary term; they score 0.0 against all others"
            );
        }

        let mut title_index = HashMap::with_capacity(movies.len());
        let mut id_index = HashMap::with_capacity(movies.len());
        let mut duplicate_titles = 0usize;
        for (row, movie) in movies.iter().enumerate() {
            if title_index.contains_key(&movie.title) {
                duplicate_titles += 1;
            } else {
                title_index.insert(movie.title.clone(), row);
            }
            id_index.entry(movie.movie_id).or_insert(row);
        }

        if duplicate_titles > 0 {
            tracing::info!(
                duplicates = duplicate_titles,
                "Duplicate titles in corpus; queries resolve to the first occurrence"
            );
        }

        tracing::info!(
            movies = matrix.size(),
            vocabulary = space.vocabulary_len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Similarity engine built"
        );

        Ok(Self {
            movies,
            space,
            matrix,
            title_index,
            id_index,
        })
    }

    /// Returns up to `k` movies most similar to the first movie titled `title`
    ///
    /// Ordered by descending score, ties by corpus order. The queried movie
    /// itself is never included.
    pub fn recommend(&self, title: &str, k: usize) -> AppResult<Vec<Recommendation>> {
        let row = *self
            .title_index
            .get(title)
            .ok_or_else(|| AppError::MovieNotFound(title.to_string()))?;

        let scores = self.matrix.row(row);
        let mut ranked: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(j, _)| *j != row)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(k);

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .map(|(j, score)| Recommendation {
                movie_id: self.movies[j].movie_id,
                title: self.movies[j].title.clone(),
                score,
            })
            .collect();

        tracing::debug!(
            title = %title,
            row = row,
            results = recommendations.len(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }

    /// Returns the `n` most popular movies, ties in corpus order
    pub fn most_popular(&self, n: usize) -> Vec<&MovieRecord> {
        let mut rows: Vec<usize> = (0..self.movies.len()).collect();
        rows.sort_by(|a, b| {
            self.movies[*b]
                .popularity
                .total_cmp(&self.movies[*a].popularity)
        });
        rows.into_iter().take(n).map(|i| &self.movies[i]).collect()
    }

    /// Distinct titles in first-seen corpus order
    pub fn titles(&self) -> Vec<&str> {
        self.movies
            .iter()
            .enumerate()
            .filter(|(row, m)| self.title_index.get(&m.title) == Some(row))
            .map(|(_, m)| m.title.as_str())
            .collect()
    }

    pub fn movie(&self, movie_id: MovieId) -> Option<&MovieRecord> {
        self.id_index.get(&movie_id).map(|&row| &self.movies[row])
    }

    /// Detail payload from the corpus display fields
    pub fn details(&self, movie_id: MovieId, poster_url: String) -> AppResult<MovieDetails> {
        let movie = self
            .movie(movie_id)
            .ok_or_else(|| AppError::MovieNotFound(format!("id {}", movie_id)))?;

        Ok(MovieDetails {
            title: movie.title.clone(),
            overview: movie.overview.join(" "),
            genre: movie.genres.join(", "),
            director: movie.crew.join(", "),
            cast: movie.cast.join(", "),
            poster_url,
            release_date: None,
            rating: None,
        })
    }

    /// Number of corpus rows, duplicates included
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    #[cfg(test)]
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn vocabulary_len(&self) -> usize {
        self.space.vocabulary_len()
    }
}
