//! Semantic matching of researchers across the internal/external populations.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::match_result::{MatchResult, NewMatch};
use crate::domain::researcher::{Researcher, ResearcherType};
use crate::matching::embedding::{Embedder, EmbeddingError, load_or_embed};
use crate::matching::keywords::relevant_keywords;
use crate::repository::errors::RepositoryError;
use crate::repository::{MatchWriter, ResearcherReader, ResearcherWriter};
use crate::{DEFAULT_KEYWORDS_TOP_N, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_N};

pub mod embedding;
pub mod keywords;

#[derive(Debug, Error)]
pub enum MatchError {
    /// The queried email has no record in the store. Distinct from a query
    /// that succeeds with zero candidates above the threshold.
    #[error("no researcher found for email: {0}")]
    ResearcherNotFound(String),
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Tunables for one match query.
#[derive(Clone, Copy, Debug)]
pub struct MatchOptions {
    pub top_n: usize,
    pub threshold: f32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

static NON_ALPHANUMERIC: OnceLock<Regex> = OnceLock::new();

/// Lowercase, strip punctuation and collapse whitespace.
///
/// Stopwords stay in: the sentence model is trained to handle them.
pub fn preprocess_text(text: &str) -> String {
    let re = NON_ALPHANUMERIC
        .get_or_init(|| Regex::new(r"[^a-z0-9\s]").expect("valid literal regex"));
    let lowered = text.to_lowercase();
    let cleaned = re.replace_all(&lowered, " ");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the text blob a researcher is embedded from.
///
/// Internal profiles describe what they can offer; external profiles describe
/// what they need.
pub fn matching_text(researcher: &Researcher) -> String {
    let parts: [&str; 3] = match researcher.researcher_type {
        ResearcherType::Internal => [
            &researcher.primary_areas,
            &researcher.experience_summary,
            &researcher.sectors_interested,
        ],
        ResearcherType::External => [
            &researcher.expertise_sought,
            &researcher.organization_focus,
            &researcher.challenge_description,
        ],
    };
    preprocess_text(&parts.join(". "))
}

/// Cosine similarity of two vectors, in [-1, 1]. Zero when either norm is zero.
pub fn cosine_similarity(u: &[f32], v: &[f32]) -> f32 {
    let dot: f32 = u.iter().zip(v.iter()).map(|(a, b)| a * b).sum();
    let norm_u = u.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_v = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_u == 0.0 || norm_v == 0.0 {
        0.0
    } else {
        dot / (norm_u * norm_v)
    }
}

fn display_percentage(score: f32) -> f32 {
    (score * 100.0).clamp(0.0, 100.0)
}

fn embedding_for<R, E>(
    repo: &R,
    embedder: &E,
    researcher: &Researcher,
) -> Result<Vec<f32>, MatchError>
where
    R: ResearcherWriter,
    E: Embedder + ?Sized,
{
    let (embedding, _) = load_or_embed(
        researcher.embedding.as_deref(),
        matching_text(researcher),
        embedder,
        |value| {
            repo.set_researcher_embedding(researcher.id, value)
                .map(|_| ())
                .map_err(|error| error.to_string())
        },
    )?;
    Ok(embedding)
}

fn build_results(
    source: &Researcher,
    candidates: &[Researcher],
    scored: &[(usize, f32)],
) -> Vec<MatchResult> {
    scored
        .iter()
        .enumerate()
        .map(|(position, &(index, score))| {
            let candidate = &candidates[index];
            let (internal, external) = match source.researcher_type {
                ResearcherType::Internal => (source, candidate),
                ResearcherType::External => (candidate, source),
            };
            MatchResult {
                researcher_id: candidate.id,
                name: candidate.name.clone(),
                email: candidate.email.clone(),
                organization: candidate.organization.clone(),
                researcher_type: candidate.researcher_type,
                score,
                percentage: display_percentage(score),
                rank: position + 1,
                keywords: relevant_keywords(internal, external, DEFAULT_KEYWORDS_TOP_N),
            }
        })
        .collect()
}

/// Rank the opposite population against `source`.
///
/// Candidates below the threshold are dropped before ranking; the sort is
/// stable, so ties keep their population order. An empty candidate population
/// is an empty result, not an error.
pub fn find_matches<R, E>(
    repo: &R,
    embedder: &E,
    source: &Researcher,
    options: &MatchOptions,
) -> Result<Vec<MatchResult>, MatchError>
where
    R: ResearcherReader + ResearcherWriter,
    E: Embedder + ?Sized,
{
    let candidates = repo.list_researchers(source.researcher_type.opposite())?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let source_embedding = embedding_for(repo, embedder, source)?;

    let mut scored = Vec::with_capacity(candidates.len());
    for (index, candidate) in candidates.iter().enumerate() {
        let candidate_embedding = embedding_for(repo, embedder, candidate)?;
        let score = cosine_similarity(&source_embedding, &candidate_embedding);
        if score >= options.threshold {
            scored.push((index, score));
        }
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(options.top_n);

    Ok(build_results(source, &candidates, &scored))
}

/// Rank matches for the researcher registered under `email`.
pub fn find_matches_for_email<R, E>(
    repo: &R,
    embedder: &E,
    email: &str,
    options: &MatchOptions,
) -> Result<Vec<MatchResult>, MatchError>
where
    R: ResearcherReader + ResearcherWriter,
    E: Embedder + ?Sized,
{
    let source = match repo.get_researcher_by_email(email) {
        Ok(source) => source,
        Err(RepositoryError::NotFound) => {
            return Err(MatchError::ResearcherNotFound(email.to_string()));
        }
        Err(error) => return Err(error.into()),
    };

    find_matches(repo, embedder, &source, options)
}

/// Pair a ranked result list with its source for persistence.
pub fn to_new_matches(source: &Researcher, results: &[MatchResult]) -> Vec<NewMatch> {
    results
        .iter()
        .map(|result| {
            let (internal_id, external_id) = match source.researcher_type {
                ResearcherType::Internal => (source.id, result.researcher_id),
                ResearcherType::External => (result.researcher_id, source.id),
            };
            NewMatch {
                internal_id,
                external_id,
                rank: result.rank as i32,
                score: result.score,
            }
        })
        .collect()
}

/// Counters reported after a full match precompute.
#[derive(Debug, Default)]
pub struct MatchAllStats {
    pub externals: usize,
    pub internals: usize,
    pub matches_written: usize,
}

/// Precompute top-N matches for every external researcher and replace the
/// persisted matches table with the result.
pub fn match_all<R, E>(
    repo: &R,
    embedder: &E,
    options: &MatchOptions,
) -> Result<MatchAllStats, MatchError>
where
    R: ResearcherReader + ResearcherWriter + MatchWriter,
    E: Embedder + ?Sized,
{
    let mut stats = MatchAllStats {
        internals: repo.list_researchers(ResearcherType::Internal)?.len(),
        ..Default::default()
    };

    let externals = repo.list_researchers(ResearcherType::External)?;
    stats.externals = externals.len();

    let mut all_matches = Vec::new();
    for external in &externals {
        let results = find_matches(repo, embedder, external, options)?;
        all_matches.extend(to_new_matches(external, &results));
    }

    stats.matches_written = repo.replace_matches(&all_matches)?;

    Ok(stats)
}
