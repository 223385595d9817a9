use serde::Serialize;

use crate::domain::researcher::ResearcherType;

/// One ranked candidate returned by a match query.
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub researcher_id: i32,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub researcher_type: ResearcherType,
    /// Raw cosine similarity in [-1, 1].
    pub score: f32,
    /// Display score: `score * 100` clamped to [0, 100].
    pub percentage: f32,
    /// 1-based position in the ranked list.
    pub rank: usize,
    pub keywords: Vec<String>,
}

/// A persisted internal/external match pair.
#[derive(Clone, Debug, Serialize)]
pub struct Match {
    pub id: i32,
    pub internal_id: i32,
    pub external_id: i32,
    pub rank: i32,
    pub score: f32,
}

/// A match pair to be persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMatch {
    pub internal_id: i32,
    pub external_id: i32,
    pub rank: i32,
    pub score: f32,
}
