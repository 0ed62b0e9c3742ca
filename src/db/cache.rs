use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::MovieId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Poster(MovieId),
    Extras(MovieId),
    Latest(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Poster(id) => write!(f, "poster:{}", id),
            CacheKey::Extras(id) => write!(f, "extras:{}", id),
            CacheKey::Latest(code) => write!(f, "latest:{}", code.to_lowercase()),
        }
    }
}

/// Memoization table for remote lookups
///
/// Entries live as long as the owning fetcher; nothing is evicted. Values are
/// stored as JSON so one table can hold every payload type.
#[derive(Clone, Default)]
pub struct Cache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves a value from the cache by key
    ///
    /// Returns `None` when the key has not been stored yet.
    pub async fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let entries = self.entries.read().await;

        match entries.get(&key.to_string()) {
            Some(json) => {
                let data = serde_json::from_str(json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// Stores a value in the cache, replacing any previous entry
    pub async fn set_in_cache<T: serde::Serialize>(&self, key: &CacheKey, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Cache serialization error");
                return;
            }
        };

        self.entries.write().await.insert(key.to_string(), json);
        tracing::debug!(key = %key, "Cached remote lookup");
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieExtras;

    #[test]
    fn test_cache_key_display_poster() {
        let key = CacheKey::Poster(MovieId(19995));
        assert_eq!(format!("{}", key), "poster:19995");
    }

    #[test]
    fn test_cache_key_display_extras() {
        let key = CacheKey::Extras(MovieId(285));
        assert_eq!(format!("{}", key), "extras:285");
    }

    #[test]
    fn test_cache_key_display_latest_lowercase() {
        let key = CacheKey::Latest("EN".to_string());
        assert_eq!(format!("{}", key), "latest:en");
    }

    #[test]
    fn test_get_missing_key() {
        let cache = Cache::new();
        let value: Option<String> =
            tokio_test::block_on(cache.get_from_cache(&CacheKey::Poster(MovieId(1)))).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::new();
        let key = CacheKey::Extras(MovieId(7));
        let extras = MovieExtras {
            genres: "Drama".to_string(),
            cast: "A, B".to_string(),
            director: "C".to_string(),
        };

        tokio_test::block_on(cache.set_in_cache(&key, &extras));
        let cached: Option<MovieExtras> =
            tokio_test::block_on(cache.get_from_cache(&key)).unwrap();

        assert_eq!(cached, Some(extras));
        assert_eq!(tokio_test::block_on(cache.len()), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = Cache::new();
        let clone = cache.clone();
        let key = CacheKey::Poster(MovieId(3));

        tokio_test::block_on(clone.set_in_cache(&key, &"poster.jpg".to_string()));
        let cached: Option<String> = tokio_test::block_on(cache.get_from_cache(&key)).unwrap();

        assert_eq!(cached.as_deref(), Some("poster.jpg"));
    }
}
