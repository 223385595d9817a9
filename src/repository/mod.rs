use crate::db::{DbPool, DbPooledConnection};
use crate::domain::match_result::{Match, NewMatch};
use crate::domain::researcher::{NewResearcher, Researcher, ResearcherType};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod matches;
pub mod researcher;

/// Diesel-backed repository over the shared connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbPooledConnection> {
        Ok(self.pool.get()?)
    }
}

pub trait ResearcherReader {
    /// Look up a researcher by normalized email. Missing records are a
    /// `RepositoryError::NotFound`, distinct from an empty listing.
    fn get_researcher_by_email(&self, email: &str) -> RepositoryResult<Researcher>;
    fn list_researchers(&self, researcher_type: ResearcherType) -> RepositoryResult<Vec<Researcher>>;
}

pub trait ResearcherWriter {
    fn clear_researchers(&self) -> RepositoryResult<usize>;
    fn create_researchers(&self, researchers: &[NewResearcher]) -> RepositoryResult<usize>;
    fn set_researcher_embedding(&self, researcher_id: i32, embedding: &[f32])
    -> RepositoryResult<usize>;
}

pub trait MatchReader {
    /// Persisted matches involving `researcher`, ordered by rank.
    fn list_matches(&self, researcher: &Researcher) -> RepositoryResult<Vec<Match>>;
}

pub trait MatchWriter {
    /// Replace the entire matches table with `matches`.
    fn replace_matches(&self, matches: &[NewMatch]) -> RepositoryResult<usize>;
    /// Replace only the matches involving `source`.
    fn replace_matches_for(
        &self,
        source: &Researcher,
        matches: &[NewMatch],
    ) -> RepositoryResult<usize>;
}
