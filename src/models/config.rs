//! Configuration model loaded from external sources.

use std::path::PathBuf;

use serde::Deserialize;

use crate::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_N};

/// Basic configuration shared across the worker.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub database_url: String,
    pub zmq_address: String,
    pub internal_roster: PathBuf,
    pub external_roster: PathBuf,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_similarity_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl ServerConfig {
    /// Load configuration from an optional YAML file with `APP_*` environment
    /// variable overrides.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("database_url", "app.db")?
            .set_default("zmq_address", "tcp://127.0.0.1:5555")?
            .set_default("internal_roster", "data/internal_researchers.csv")?
            .set_default("external_roster", "data/external_researchers.csv")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
