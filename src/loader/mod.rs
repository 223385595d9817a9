//! Roster ingestion: CSV files with human-authored headers are mapped onto
//! researcher records, validated row by row and bulk-loaded into the store.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::domain::researcher::{NewResearcher, ResearcherType, normalize_email};
use crate::repository::ResearcherWriter;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read roster: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column '{0}' not found in header row")]
    MissingColumn(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Logical roster fields a column can map to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RosterField {
    Name,
    Email,
    Organization,
    FacultyDepartment,
    PrimaryAreas,
    ExperienceSummary,
    SectorsInterested,
    OrganizationFocus,
    ChallengeDescription,
    ExpertiseSought,
    LabToursInterested,
}

impl RosterField {
    fn name(&self) -> &'static str {
        match self {
            RosterField::Name => "name",
            RosterField::Email => "email",
            RosterField::Organization => "organization",
            RosterField::FacultyDepartment => "faculty_department",
            RosterField::PrimaryAreas => "primary_areas",
            RosterField::ExperienceSummary => "experience_summary",
            RosterField::SectorsInterested => "sectors_interested",
            RosterField::OrganizationFocus => "organization_focus",
            RosterField::ChallengeDescription => "challenge_description",
            RosterField::ExpertiseSought => "expertise_sought",
            RosterField::LabToursInterested => "lab_tours_interested",
        }
    }
}

/// Header aliases accepted for one logical field, with an optional positional
/// fallback for headerless revisions of the same sheet.
pub struct FieldSpec {
    pub field: RosterField,
    pub aliases: &'static [&'static str],
    pub fallback_index: Option<usize>,
}

/// Declarative description of one roster file.
pub struct RosterSpec {
    pub researcher_type: ResearcherType,
    /// Used when the file has no organization column.
    pub default_organization: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Column mapping for the internal researcher roster.
///
/// Aliases cover the survey export and the shorter hand-edited revisions of
/// the same sheet; matching is case- and whitespace-insensitive and falls
/// back to substring containment for the long survey questions.
pub fn internal_roster_spec() -> RosterSpec {
    RosterSpec {
        researcher_type: ResearcherType::Internal,
        default_organization: "Humber Polytechnic",
        fields: &[
            FieldSpec {
                field: RosterField::Name,
                aliases: &["Your Name", "Researcher Full Name", "Name"],
                fallback_index: Some(0),
            },
            FieldSpec {
                field: RosterField::Email,
                aliases: &["Email Address", "Humber Email", "Email"],
                fallback_index: Some(1),
            },
            FieldSpec {
                field: RosterField::FacultyDepartment,
                aliases: &[
                    "Your Faculty/Department",
                    "Faculty / Department",
                    "Faculty/Department",
                ],
                fallback_index: None,
            },
            FieldSpec {
                field: RosterField::PrimaryAreas,
                aliases: &[
                    "primary areas of research or expertise",
                    "Research Interest Keywords",
                    "Primary Areas",
                ],
                fallback_index: None,
            },
            FieldSpec {
                field: RosterField::ExperienceSummary,
                aliases: &[
                    "summary of your experience or capabilities",
                    "Experience Summary",
                ],
                fallback_index: None,
            },
            FieldSpec {
                field: RosterField::SectorsInterested,
                aliases: &[
                    "sectors or societal challenges",
                    "Sectors Interested",
                ],
                fallback_index: None,
            },
        ],
    }
}

/// Column mapping for the external researcher roster.
pub fn external_roster_spec() -> RosterSpec {
    RosterSpec {
        researcher_type: ResearcherType::External,
        default_organization: "",
        fields: &[
            FieldSpec {
                field: RosterField::Name,
                aliases: &["Your Name", "Name"],
                fallback_index: Some(0),
            },
            FieldSpec {
                field: RosterField::Email,
                aliases: &["Email Address", "Email"],
                fallback_index: Some(1),
            },
            FieldSpec {
                field: RosterField::Organization,
                aliases: &["Your Orgnization", "Your Organization", "Organization"],
                fallback_index: None,
            },
            FieldSpec {
                field: RosterField::OrganizationFocus,
                aliases: &[
                    "primary area of focus or industry sector",
                    "Organization Focus",
                ],
                fallback_index: None,
            },
            FieldSpec {
                field: RosterField::ChallengeDescription,
                aliases: &[
                    "challenge or business goal",
                    "Challenge Description",
                ],
                fallback_index: None,
            },
            FieldSpec {
                field: RosterField::ExpertiseSought,
                aliases: &[
                    "expertise or research support",
                    "Expertise Sought",
                ],
                fallback_index: None,
            },
            FieldSpec {
                field: RosterField::LabToursInterested,
                aliases: &["lab tour", "Lab Tours"],
                fallback_index: None,
            },
        ],
    }
}

/// Counters reported after a full reload.
#[derive(Debug, Default, Serialize)]
pub struct LoadSummary {
    pub internal_inserted: usize,
    pub external_inserted: usize,
    pub skipped_missing: usize,
    pub skipped_duplicates: usize,
    pub failed_files: Vec<String>,
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve each spec field to a column index against the header row.
///
/// Exact normalized matches win; the long survey-question headers are matched
/// by containment; a positional fallback applies last. Unresolvable name or
/// email columns fail the whole file.
fn resolve_columns(
    headers: &[String],
    spec: &RosterSpec,
) -> Result<HashMap<RosterField, usize>, LoaderError> {
    let mut map = HashMap::new();

    for field_spec in spec.fields {
        let mut resolved = None;
        for alias in field_spec.aliases {
            let alias = normalize_header(alias);
            if let Some(index) = headers.iter().position(|header| *header == alias) {
                resolved = Some(index);
                break;
            }
        }
        if resolved.is_none() {
            for alias in field_spec.aliases {
                let alias = normalize_header(alias);
                if let Some(index) = headers.iter().position(|header| header.contains(&alias)) {
                    resolved = Some(index);
                    break;
                }
            }
        }
        if resolved.is_none() {
            resolved = field_spec
                .fallback_index
                .filter(|index| *index < headers.len());
        }

        match resolved {
            Some(index) => {
                map.insert(field_spec.field, index);
            }
            None if matches!(field_spec.field, RosterField::Name | RosterField::Email) => {
                return Err(LoaderError::MissingColumn(field_spec.field.name()));
            }
            None => {}
        }
    }

    Ok(map)
}

fn build_record(
    spec: &RosterSpec,
    columns: &HashMap<RosterField, usize>,
    row: &csv::StringRecord,
) -> Option<NewResearcher> {
    let cell = |field: RosterField| -> String {
        columns
            .get(&field)
            .and_then(|&index| row.get(index))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let name = cell(RosterField::Name);
    let email = normalize_email(&cell(RosterField::Email));
    if name.is_empty() || email.is_empty() {
        return None;
    }

    let mut organization = cell(RosterField::Organization);
    if organization.is_empty() {
        organization = spec.default_organization.to_string();
    }

    Some(NewResearcher {
        name,
        email,
        organization,
        researcher_type: spec.researcher_type,
        faculty_department: cell(RosterField::FacultyDepartment),
        primary_areas: cell(RosterField::PrimaryAreas),
        experience_summary: cell(RosterField::ExperienceSummary),
        sectors_interested: cell(RosterField::SectorsInterested),
        organization_focus: cell(RosterField::OrganizationFocus),
        challenge_description: cell(RosterField::ChallengeDescription),
        expertise_sought: cell(RosterField::ExpertiseSought),
        lab_tours_interested: cell(RosterField::LabToursInterested),
    })
}

/// Parse one roster from any reader. `seen` carries normalized emails across
/// files so the first occurrence in overall file order wins.
pub fn load_roster_from_reader<R: Read>(
    reader: R,
    spec: &RosterSpec,
    seen: &mut HashSet<String>,
    summary: &mut LoadSummary,
) -> Result<Vec<NewResearcher>, LoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect::<Vec<_>>();
    let columns = resolve_columns(&headers, spec)?;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let Some(record) = build_record(spec, &columns, &row) else {
            summary.skipped_missing += 1;
            continue;
        };
        if !seen.insert(record.email.clone()) {
            log::debug!("Skipping duplicate email: {}", record.email);
            summary.skipped_duplicates += 1;
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// Parse one roster file.
pub fn load_roster(
    path: &Path,
    spec: &RosterSpec,
    seen: &mut HashSet<String>,
    summary: &mut LoadSummary,
) -> Result<Vec<NewResearcher>, LoaderError> {
    let file = std::fs::File::open(path).map_err(|error| {
        LoaderError::Csv(csv::Error::from(error))
    })?;
    load_roster_from_reader(file, spec, seen, summary)
}

/// Full reload: clear the store, then load the internal and external rosters.
///
/// A failure in one file does not stop the other; it is logged and recorded
/// in `failed_files` so the caller can surface the partial outcome. Only a
/// failing clear or insert aborts the operation.
pub fn load_all<R: ResearcherWriter>(
    repo: &R,
    internal_path: &Path,
    external_path: &Path,
) -> Result<LoadSummary, LoaderError> {
    repo.clear_researchers()?;

    let mut seen = HashSet::new();
    let mut summary = LoadSummary::default();

    let rosters: [(&Path, RosterSpec); 2] = [
        (internal_path, internal_roster_spec()),
        (external_path, external_roster_spec()),
    ];

    for (path, spec) in rosters {
        match load_roster(path, &spec, &mut seen, &mut summary) {
            Ok(records) => {
                let inserted = repo.create_researchers(&records)?;
                match spec.researcher_type {
                    ResearcherType::Internal => summary.internal_inserted = inserted,
                    ResearcherType::External => summary.external_inserted = inserted,
                }
            }
            Err(error) => {
                log::warn!(
                    "Failed to load {} roster from {}: {error}",
                    spec.researcher_type,
                    path.display()
                );
                summary.failed_files.push(path.display().to_string());
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn parse(data: &str, spec: &RosterSpec) -> (Vec<NewResearcher>, LoadSummary) {
        let mut seen = HashSet::new();
        let mut summary = LoadSummary::default();
        let records = load_roster_from_reader(data.as_bytes(), spec, &mut seen, &mut summary)
            .expect("roster should parse");
        (records, summary)
    }

    #[test]
    fn resolves_survey_headers_by_containment() {
        let data = "Your Name,Email Address,What are your primary areas of research or expertise?Please list key words,Sectors\n\
                    Ada Lovelace,ada@example.com,analytical engines,\n";
        let (records, _) = parse(data, &internal_roster_spec());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].primary_areas, "analytical engines");
    }

    #[test]
    fn missing_email_column_is_an_error() {
        let mut seen = HashSet::new();
        let mut summary = LoadSummary::default();
        // single column, so the email positional fallback is out of range too
        let data = "Your Name\nAda\n";
        let result = load_roster_from_reader(
            data.as_bytes(),
            &external_roster_spec(),
            &mut seen,
            &mut summary,
        );
        assert!(matches!(result, Err(LoaderError::MissingColumn("email"))));
    }

    #[test]
    fn positional_fallback_covers_unlabelled_name_and_email() {
        // headers reworded beyond recognition; columns 0 and 1 still hold them
        let data = "Person,Contact\nAda Lovelace,ada@example.com\n";
        let (records, _) = parse(data, &internal_roster_spec());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "ada@example.com");
    }

    #[test]
    fn rows_without_name_or_email_are_skipped_and_counted() {
        let data = "Name,Email\n,missing-name@example.com\nAda,\nGrace,grace@example.com\n";
        let (records, summary) = parse(data, &internal_roster_spec());
        assert_eq!(records.len(), 1);
        assert_eq!(summary.skipped_missing, 2);
    }

    #[test]
    fn duplicate_emails_keep_first_occurrence_across_files() {
        let mut seen = HashSet::new();
        let mut summary = LoadSummary::default();
        let internal = "Name,Email\nJane,Jane.Doe@Example.com\n";
        let external = "Name,Email\nJane again,jane.doe@example.com \n";

        let first = load_roster_from_reader(
            internal.as_bytes(),
            &internal_roster_spec(),
            &mut seen,
            &mut summary,
        )
        .expect("internal roster should parse");
        let second = load_roster_from_reader(
            external.as_bytes(),
            &external_roster_spec(),
            &mut seen,
            &mut summary,
        )
        .expect("external roster should parse");

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].email, "jane.doe@example.com");
        assert!(second.is_empty());
        assert_eq!(summary.skipped_duplicates, 1);
    }

    #[test]
    fn internal_rows_default_the_organization() {
        let data = "Name,Email\nAda,ada@example.com\n";
        let (records, _) = parse(data, &internal_roster_spec());
        assert_eq!(records[0].organization, "Humber Polytechnic");
    }
}
