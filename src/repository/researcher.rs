use bytemuck::cast_slice;
use diesel::prelude::*;

use crate::domain::researcher::{
    NewResearcher, Researcher, ResearcherType, normalize_email,
};
use crate::models::researcher::{
    NewResearcher as DbNewResearcher, Researcher as DbResearcher,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ResearcherReader, ResearcherWriter};

impl ResearcherReader for DieselRepository {
    fn get_researcher_by_email(&self, email: &str) -> RepositoryResult<Researcher> {
        use crate::schema::researchers;

        let mut conn = self.conn()?;

        // Emails are stored normalized, so normalize the lookup key too
        let result = researchers::table
            .filter(researchers::email.eq(normalize_email(email)))
            .first::<DbResearcher>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        Researcher::try_from(result).map_err(RepositoryError::Validation)
    }

    fn list_researchers(
        &self,
        researcher_type: ResearcherType,
    ) -> RepositoryResult<Vec<Researcher>> {
        use crate::schema::researchers;

        let mut conn = self.conn()?;

        let result = researchers::table
            .filter(researchers::researcher_type.eq(researcher_type.as_str()))
            .order(researchers::id.asc())
            .load::<DbResearcher>(&mut conn)?;

        result
            .into_iter()
            .map(Researcher::try_from)
            .collect::<Result<Vec<Researcher>, _>>()
            .map_err(RepositoryError::Validation)
    }
}

impl ResearcherWriter for DieselRepository {
    fn clear_researchers(&self) -> RepositoryResult<usize> {
        use crate::schema::{matches, researchers};

        let mut conn = self.conn()?;

        let deleted = conn.transaction(|conn| {
            // Matches reference researchers, so they go first
            diesel::delete(matches::table).execute(conn)?;
            diesel::delete(researchers::table).execute(conn)
        })?;

        Ok(deleted)
    }

    fn create_researchers(&self, researchers: &[NewResearcher]) -> RepositoryResult<usize> {
        use crate::schema::researchers as researchers_table;

        if researchers.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;

        let rows = researchers
            .iter()
            .cloned()
            .map(DbNewResearcher::from)
            .collect::<Vec<_>>();

        let inserted = conn.transaction(|conn| {
            diesel::insert_into(researchers_table::table)
                .values(&rows)
                .execute(conn)
        })?;

        Ok(inserted)
    }

    fn set_researcher_embedding(
        &self,
        researcher_id: i32,
        embedding: &[f32],
    ) -> RepositoryResult<usize> {
        use crate::schema::researchers;

        let mut conn = self.conn()?;

        // Convert &[f32] to &[u8]
        let blob: Vec<u8> = cast_slice(embedding).to_vec();

        let affected = diesel::update(
            researchers::table.filter(researchers::id.eq(researcher_id)),
        )
        .set(researchers::embedding.eq(blob))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
