use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::researcher::{
    NewResearcher as DomainNewResearcher, Researcher as DomainResearcher, ResearcherType,
};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::researchers)]
pub struct Researcher {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub researcher_type: String,
    pub faculty_department: String,
    pub primary_areas: String,
    pub experience_summary: String,
    pub sectors_interested: String,
    pub organization_focus: String,
    pub challenge_description: String,
    pub expertise_sought: String,
    pub lab_tours_interested: String,
    pub embedding: Option<Vec<u8>>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::researchers)]
pub struct NewResearcher {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub researcher_type: String,
    pub faculty_department: String,
    pub primary_areas: String,
    pub experience_summary: String,
    pub sectors_interested: String,
    pub organization_focus: String,
    pub challenge_description: String,
    pub expertise_sought: String,
    pub lab_tours_interested: String,
}

impl TryFrom<Researcher> for DomainResearcher {
    type Error = String;

    fn try_from(db: Researcher) -> Result<Self, Self::Error> {
        let researcher_type: ResearcherType = db.researcher_type.parse()?;
        Ok(DomainResearcher {
            id: db.id,
            name: db.name,
            email: db.email,
            organization: db.organization,
            researcher_type,
            faculty_department: db.faculty_department,
            primary_areas: db.primary_areas,
            experience_summary: db.experience_summary,
            sectors_interested: db.sectors_interested,
            organization_focus: db.organization_focus,
            challenge_description: db.challenge_description,
            expertise_sought: db.expertise_sought,
            lab_tours_interested: db.lab_tours_interested,
            embedding: db.embedding,
        })
    }
}

impl From<DomainNewResearcher> for NewResearcher {
    fn from(new: DomainNewResearcher) -> Self {
        NewResearcher {
            name: new.name,
            email: new.email,
            organization: new.organization,
            researcher_type: new.researcher_type.as_str().to_string(),
            faculty_department: new.faculty_department,
            primary_areas: new.primary_areas,
            experience_summary: new.experience_summary,
            sectors_interested: new.sectors_interested,
            organization_focus: new.organization_focus,
            challenge_description: new.challenge_description,
            expertise_sought: new.expertise_sought,
            lab_tours_interested: new.lab_tours_interested,
        }
    }
}
