use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movie database API key, sent as the `api_key` query parameter
    pub api_key: String,

    /// Movie lookup endpoint, e.g. `https://api.themoviedb.org/3/movie`
    pub base_url: String,

    /// Root of the movie database API (discover and details calls)
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// Prefix prepended to `poster_path` values
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Poster shown when no remote poster is available
    #[serde(default = "default_fallback_poster")]
    pub fallback_poster: String,

    /// CSV file holding the movie corpus
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,

    /// Maximum vocabulary size of the term vector space
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    #[serde(default = "default_discover_timeout_secs")]
    pub discover_timeout_secs: u64,

    /// Number of concurrent remote lookups
    #[serde(default = "default_fetch_workers")]
    pub fetch_workers: usize,

    /// Release region used by the latest-movies query
    #[serde(default = "default_region")]
    pub region: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_api_root() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_fallback_poster() -> String {
    "assets/empty.png".to_string()
}

fn default_corpus_path() -> String {
    "Datasets/movies_cleaned.csv".to_string()
}

fn default_max_features() -> usize {
    5000
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_discover_timeout_secs() -> u64 {
    10
}

fn default_fetch_workers() -> usize {
    8
}

fn default_region() -> String {
    "IN".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config (check API_KEY and BASE_URL): {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_iter(vars(&[
            ("API_KEY", "secret"),
            ("BASE_URL", "https://api.themoviedb.org/3/movie"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.max_features, 5000);
        assert_eq!(config.poster_timeout_secs, 5);
        assert_eq!(config.discover_timeout_secs, 10);
        assert_eq!(config.fallback_poster, "assets/empty.png");
        assert_eq!(config.region, "IN");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_iter(vars(&[
            ("API_KEY", "secret"),
            ("BASE_URL", "http://localhost/movie"),
            ("MAX_FEATURES", "100"),
            ("FETCH_WORKERS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.max_features, 100);
        assert_eq!(config.fetch_workers, 2);
    }

    #[test]
    fn test_missing_api_key_fails() {
        let result = Config::from_iter(vars(&[("BASE_URL", "http://localhost/movie")]));
        assert!(result.is_err());
    }
}
