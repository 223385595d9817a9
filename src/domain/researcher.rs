use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which side of the matching population a researcher belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearcherType {
    Internal,
    External,
}

impl ResearcherType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearcherType::Internal => "internal",
            ResearcherType::External => "external",
        }
    }

    /// The population searched when matching a researcher of this type.
    pub fn opposite(&self) -> ResearcherType {
        match self {
            ResearcherType::Internal => ResearcherType::External,
            ResearcherType::External => ResearcherType::Internal,
        }
    }
}

impl fmt::Display for ResearcherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResearcherType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "internal" => Ok(ResearcherType::Internal),
            "external" => Ok(ResearcherType::External),
            other => Err(format!("unknown researcher type: {other}")),
        }
    }
}

/// A stored researcher profile.
///
/// Free-text attributes are kept as plain strings; the ones that do not apply
/// to the record's subtype stay empty.
#[derive(Clone, Debug, Serialize)]
pub struct Researcher {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub researcher_type: ResearcherType,
    pub faculty_department: String,
    pub primary_areas: String,
    pub experience_summary: String,
    pub sectors_interested: String,
    pub organization_focus: String,
    pub challenge_description: String,
    pub expertise_sought: String,
    pub lab_tours_interested: String,
    #[serde(skip)]
    pub embedding: Option<Vec<u8>>,
}

/// A researcher parsed from a roster file, not yet persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewResearcher {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub researcher_type: ResearcherType,
    pub faculty_department: String,
    pub primary_areas: String,
    pub experience_summary: String,
    pub sectors_interested: String,
    pub organization_focus: String,
    pub challenge_description: String,
    pub expertise_sought: String,
    pub lab_tours_interested: String,
}

/// Canonical form of an email used for identity: trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn researcher_type_round_trips_through_str() {
        for value in [ResearcherType::Internal, ResearcherType::External] {
            assert_eq!(value.as_str().parse::<ResearcherType>(), Ok(value));
        }
    }

    #[test]
    fn opposite_swaps_populations() {
        assert_eq!(ResearcherType::Internal.opposite(), ResearcherType::External);
        assert_eq!(ResearcherType::External.opposite(), ResearcherType::Internal);
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(
            normalize_email(" Jane.Doe@Example.com "),
            "jane.doe@example.com"
        );
    }
}
