use std::sync::Arc;

use crate::services::{MetadataService, RecommendationEngine};

/// Shared application state
///
/// The engine is built once at startup and only read afterwards, so it is
/// shared without a lock.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub metadata: MetadataService,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, metadata: MetadataService) -> Self {
        Self {
            engine: Arc::new(engine),
            metadata,
        }
    }
}
