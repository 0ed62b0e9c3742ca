pub mod metadata;
pub mod providers;
pub mod recommendations;
pub mod similarity;
pub mod tokenizer;
pub mod vectorizer;

pub use metadata::MetadataService;
pub use providers::{MovieDataProvider, TmdbProvider};
pub use recommendations::RecommendationEngine;
