pub mod cache;
pub mod corpus;

mod macros;

pub use cache::Cache;
pub use cache::CacheKey;
pub use corpus::{load_corpus, read_corpus};
