//! Shared sentence-embedding model and vector helpers.

use std::sync::Mutex;

use bytemuck::cast_slice;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to initialize embedding model: {0}")]
    Init(String),
    #[error("failed to generate embedding: {0}")]
    Embed(String),
    #[error("failed to persist embedding: {0}")]
    Persist(String),
    #[error("embedding model lock poisoned")]
    Poisoned,
}

/// Text-to-vector mapping. Implementations must be deterministic: the same
/// text always yields the same vector.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Process-wide fastembed model.
///
/// Construction downloads and loads the model (seconds), so the worker builds
/// one instance at startup and shares it; inference is serialized behind the
/// mutex.
pub struct FastembedEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastembedEmbedder {
    pub fn new() -> Result<Self, EmbeddingError> {
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
            .map_err(|error| EmbeddingError::Init(format!("{error:?}")))?;
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for FastembedEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut model = self.model.lock().map_err(|_| EmbeddingError::Poisoned)?;
        let embeddings = model
            .embed(texts.to_vec(), None)
            .map_err(|error| EmbeddingError::Embed(format!("{error:?}")))?;
        Ok(embeddings
            .into_iter()
            .map(|value| normalize_embedding(&value))
            .collect())
    }
}

/// Normalize a vector to unit length.
///
/// Returns the original vector when the norm is zero.
pub fn normalize_embedding(vec: &[f32]) -> Vec<f32> {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        vec.to_vec()
    } else {
        vec.iter().map(|x| x / norm).collect()
    }
}

/// Reuse a stored embedding blob when present, otherwise generate one and
/// persist it through `persist`.
///
/// Returns the embedding and a flag indicating whether a new embedding was
/// generated.
pub fn load_or_embed<E, F>(
    existing_blob: Option<&[u8]>,
    text: String,
    embedder: &E,
    persist: F,
) -> Result<(Vec<f32>, bool), EmbeddingError>
where
    E: Embedder + ?Sized,
    F: FnOnce(&[f32]) -> Result<(), String>,
{
    if let Some(blob) = existing_blob {
        return Ok((cast_slice(blob).to_vec(), false));
    }

    let generated = embedder
        .embed(std::slice::from_ref(&text))?
        .into_iter()
        .next()
        .unwrap_or_default();

    persist(&generated).map_err(EmbeddingError::Persist)?;

    Ok((generated, true))
}
