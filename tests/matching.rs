use academia_match::domain::researcher::{NewResearcher, ResearcherType};
use academia_match::matching::embedding::{Embedder, EmbeddingError, normalize_embedding};
use academia_match::matching::{MatchError, MatchOptions, find_matches_for_email, match_all};
use academia_match::repository::{
    DieselRepository, MatchReader, ResearcherReader, ResearcherWriter,
};

mod common;

use common::TestDb;

/// Deterministic stand-in for the sentence model: counts occurrences of a
/// fixed vocabulary, so identical text maps to identical vectors.
struct StubEmbedder;

const AXES: [&str; 4] = ["robotics", "agriculture", "finance", "education"];

impl Embedder for StubEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts
            .iter()
            .map(|text| {
                let counts = AXES.map(|axis| text.matches(axis).count() as f32);
                normalize_embedding(&counts)
            })
            .collect())
    }
}

fn internal(name: &str, email: &str, primary_areas: &str) -> NewResearcher {
    NewResearcher {
        name: name.to_string(),
        email: email.to_string(),
        organization: "Humber Polytechnic".to_string(),
        researcher_type: ResearcherType::Internal,
        faculty_department: String::new(),
        primary_areas: primary_areas.to_string(),
        experience_summary: String::new(),
        sectors_interested: String::new(),
        organization_focus: String::new(),
        challenge_description: String::new(),
        expertise_sought: String::new(),
        lab_tours_interested: String::new(),
    }
}

fn external(name: &str, email: &str, expertise_sought: &str) -> NewResearcher {
    NewResearcher {
        name: name.to_string(),
        email: email.to_string(),
        organization: "Acme Corp".to_string(),
        researcher_type: ResearcherType::External,
        faculty_department: String::new(),
        primary_areas: String::new(),
        experience_summary: String::new(),
        sectors_interested: String::new(),
        organization_focus: String::new(),
        challenge_description: String::new(),
        expertise_sought: expertise_sought.to_string(),
        lab_tours_interested: String::new(),
    }
}

#[test]
fn identical_text_scores_maximal() {
    let db = TestDb::new();
    let repo = DieselRepository::new(db.pool());
    repo.create_researchers(&[
        internal("Ada", "ada@example.com", "robotics agriculture"),
        external("Acme", "acme@example.com", "robotics agriculture"),
    ])
    .expect("insert should succeed");

    let results = find_matches_for_email(
        &repo,
        &StubEmbedder,
        "ada@example.com",
        &MatchOptions::default(),
    )
    .expect("match should succeed");

    assert_eq!(results.len(), 1);
    assert!((results[0].score - 1.0).abs() < 1e-5);
    assert!((results[0].percentage - 100.0).abs() < 1e-3);
    assert_eq!(results[0].rank, 1);
}

#[test]
fn results_are_ordered_thresholded_and_limited() {
    let db = TestDb::new();
    let repo = DieselRepository::new(db.pool());
    repo.create_researchers(&[
        internal("Ada", "ada@example.com", "robotics agriculture"),
        external("Exact", "exact@example.com", "robotics agriculture"),
        external("Partial", "partial@example.com", "robotics"),
        external("Unrelated", "unrelated@example.com", "finance"),
    ])
    .expect("insert should succeed");

    let options = MatchOptions {
        top_n: 2,
        ..Default::default()
    };
    let results = find_matches_for_email(&repo, &StubEmbedder, "ada@example.com", &options)
        .expect("match should succeed");

    assert!(results.len() <= options.top_n);
    assert_eq!(results[0].email, "exact@example.com");
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for result in &results {
        assert!(result.score >= options.threshold);
        assert_ne!(result.email, "unrelated@example.com");
    }
}

#[test]
fn tied_scores_keep_population_order() {
    let db = TestDb::new();
    let repo = DieselRepository::new(db.pool());
    repo.create_researchers(&[
        internal("Ada", "ada@example.com", "robotics"),
        external("First", "first@example.com", "robotics"),
        external("Second", "second@example.com", "robotics"),
    ])
    .expect("insert should succeed");

    let results = find_matches_for_email(
        &repo,
        &StubEmbedder,
        "ada@example.com",
        &MatchOptions::default(),
    )
    .expect("match should succeed");

    let emails: Vec<&str> = results.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(emails, ["first@example.com", "second@example.com"]);
}

#[test]
fn empty_candidate_population_yields_empty_list() {
    let db = TestDb::new();
    let repo = DieselRepository::new(db.pool());
    repo.create_researchers(&[internal("Ada", "ada@example.com", "robotics")])
        .expect("insert should succeed");

    let results = find_matches_for_email(
        &repo,
        &StubEmbedder,
        "ada@example.com",
        &MatchOptions::default(),
    )
    .expect("match should succeed");

    assert!(results.is_empty());
}

#[test]
fn unknown_email_is_distinguishable_from_zero_matches() {
    let db = TestDb::new();
    let repo = DieselRepository::new(db.pool());

    let result = find_matches_for_email(
        &repo,
        &StubEmbedder,
        "nobody@example.com",
        &MatchOptions::default(),
    );

    assert!(matches!(result, Err(MatchError::ResearcherNotFound(_))));
}

#[test]
fn candidate_embeddings_are_persisted_for_reuse() {
    let db = TestDb::new();
    let repo = DieselRepository::new(db.pool());
    repo.create_researchers(&[
        internal("Ada", "ada@example.com", "robotics"),
        external("Acme", "acme@example.com", "robotics"),
    ])
    .expect("insert should succeed");

    find_matches_for_email(
        &repo,
        &StubEmbedder,
        "ada@example.com",
        &MatchOptions::default(),
    )
    .expect("match should succeed");

    let externals = repo
        .list_researchers(ResearcherType::External)
        .expect("listing should succeed");
    assert!(externals.iter().all(|r| r.embedding.is_some()));
}

#[test]
fn match_all_replaces_persisted_matches() {
    let db = TestDb::new();
    let repo = DieselRepository::new(db.pool());
    repo.create_researchers(&[
        internal("Ada", "ada@example.com", "robotics"),
        internal("Grace", "grace@example.com", "agriculture"),
        external("Acme", "acme@example.com", "robotics agriculture"),
    ])
    .expect("insert should succeed");

    let options = MatchOptions::default();
    let first = match_all(&repo, &StubEmbedder, &options).expect("match-all should succeed");
    let second = match_all(&repo, &StubEmbedder, &options).expect("match-all should succeed");

    assert_eq!(first.externals, 1);
    assert_eq!(first.internals, 2);
    assert_eq!(first.matches_written, 2);
    assert_eq!(second.matches_written, first.matches_written);

    let acme = repo
        .get_researcher_by_email("acme@example.com")
        .expect("acme should be stored");
    let persisted = repo.list_matches(&acme).expect("listing should succeed");
    assert_eq!(persisted.len(), 2);
    assert!(persisted[0].rank <= persisted[1].rank);
    assert!(persisted[0].score >= persisted[1].score);
}
