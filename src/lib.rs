pub mod db;
pub mod domain;
pub mod loader;
pub mod matching;
pub mod models;
pub mod processing;
pub mod repository;
pub mod schema;

/// Canonical cosine-similarity cutoff below which a candidate is not a match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.1;

/// Default number of ranked candidates returned per match query.
pub const DEFAULT_TOP_N: usize = 5;

/// Default number of keywords attached to a match result.
pub const DEFAULT_KEYWORDS_TOP_N: usize = 7;
