use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod language;

pub use language::{Language, LANGUAGES};

/// Movie database identifier of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the movie corpus
///
/// `tags` is the only input to similarity; the remaining fields are carried
/// through for presentation. List columns are decoded once at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub movie_id: MovieId,
    pub title: String,
    pub tags: String,
    pub overview: Vec<String>,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub crew: Vec<String>,
    pub popularity: f64,
}

impl MovieRecord {
    /// Builds a record with only the fields the similarity engine needs
    pub fn new(movie_id: u64, title: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            movie_id: MovieId(movie_id),
            title: title.into(),
            tags: tags.into(),
            overview: Vec::new(),
            genres: Vec::new(),
            cast: Vec::new(),
            crew: Vec::new(),
            popularity: 0.0,
        }
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }
}

/// A ranked neighbour returned by the similarity engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
}

/// Grid entry handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterCard {
    pub poster_url: String,
    pub title: String,
    pub movie_id: MovieId,
}

/// Poster card of a recommendation, carrying its similarity score
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationCard {
    #[serde(flatten)]
    pub card: PosterCard,
    pub score: f32,
}

impl RecommendationCard {
    pub fn new(recommendation: Recommendation, poster_url: String) -> Self {
        Self {
            card: PosterCard {
                poster_url,
                title: recommendation.title,
                movie_id: recommendation.movie_id,
            },
            score: recommendation.score,
        }
    }
}

/// Detail payload rendered when a movie is selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    pub overview: String,
    pub genre: String,
    pub director: String,
    pub cast: String,
    pub poster_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Credits and genres of a remote movie, already joined for display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieExtras {
    pub genres: String,
    pub cast: String,
    pub director: String,
}

/// Newly released movie returned by the discover endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestMovie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub rating: f64,
    pub poster_url: String,
}

/// Latest movie enriched with its credits
#[derive(Debug, Clone, Serialize)]
pub struct LatestMovieCard {
    #[serde(flatten)]
    pub movie: LatestMovie,
    #[serde(flatten)]
    pub extras: MovieExtras,
}

// ============================================================================
// Movie database API Types
// ============================================================================

/// Subset of GET /movie/{id} used for poster lookups
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Response of GET /discover/movie
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDiscoverResponse {
    #[serde(default)]
    pub results: Vec<ApiDiscoverMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiDiscoverMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Response of GET /movie/{id}?append_to_response=credits
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovieDetails {
    #[serde(default)]
    pub genres: Vec<ApiGenre>,
    #[serde(default)]
    pub credits: ApiCredits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiGenre {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCredits {
    #[serde(default)]
    pub cast: Vec<ApiCastMember>,
    #[serde(default)]
    pub crew: Vec<ApiCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCastMember {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// Number of leading cast members shown in movie extras
const EXTRAS_CAST_LIMIT: usize = 3;

impl From<ApiMovieDetails> for MovieExtras {
    fn from(details: ApiMovieDetails) -> Self {
        let genres = details
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let cast = details
            .credits
            .cast
            .iter()
            .take(EXTRAS_CAST_LIMIT)
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let director = details
            .credits
            .crew
            .iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        MovieExtras {
            genres,
            cast,
            director,
        }
    }
}
