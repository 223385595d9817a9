use std::sync::Arc;

use crate::matching::embedding::Embedder;
use crate::matching::{MatchOptions, find_matches, match_all, to_new_matches};
use crate::repository::errors::RepositoryError;
use crate::repository::{MatchWriter, ResearcherReader, ResearcherWriter};

/// Handle a single-researcher match trigger: rank the opposite population and
/// replace that researcher's persisted matches.
pub async fn process_match_message<R>(
    repo: R,
    embedder: Option<Arc<dyn Embedder>>,
    email: String,
    options: MatchOptions,
) where
    R: ResearcherReader + ResearcherWriter + MatchWriter,
{
    log::info!("Received match request for {email}");

    let Some(embedder) = embedder else {
        log::error!("Cannot match {email}: embedding model is not available");
        return;
    };

    let source = match repo.get_researcher_by_email(&email) {
        Ok(source) => source,
        Err(RepositoryError::NotFound) => {
            log::warn!("No researcher registered under {email}");
            return;
        }
        Err(error) => {
            log::error!("Failed to look up researcher {email}: {error}");
            return;
        }
    };

    let results = match find_matches(&repo, embedder.as_ref(), &source, &options) {
        Ok(results) => results,
        Err(error) => {
            log::error!("Match request for {email} failed: {error}");
            return;
        }
    };

    let new_matches = to_new_matches(&source, &results);
    if let Err(error) = repo.replace_matches_for(&source, &new_matches) {
        log::error!("Failed to persist matches for {email}: {error}");
        return;
    }

    log::info!("Finished match for {email}: matches={}", results.len());
}

/// Handle a match-all trigger: precompute matches for every external
/// researcher and replace the matches table.
pub async fn process_match_all_message<R>(
    repo: R,
    embedder: Option<Arc<dyn Embedder>>,
    options: MatchOptions,
) where
    R: ResearcherReader + ResearcherWriter + MatchWriter,
{
    log::info!("Received match-all request");

    let Some(embedder) = embedder else {
        log::error!("Cannot run match-all: embedding model is not available");
        return;
    };

    match match_all(&repo, embedder.as_ref(), &options) {
        Ok(stats) => log::info!(
            "Finished match-all: externals={}, internals={}, matches_written={}",
            stats.externals,
            stats.internals,
            stats.matches_written
        ),
        Err(error) => log::error!("Match-all failed: {error}"),
    }
}
