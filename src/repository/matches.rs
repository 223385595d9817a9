use diesel::prelude::*;

use crate::domain::match_result::{Match, NewMatch};
use crate::domain::researcher::{Researcher, ResearcherType};
use crate::models::match_result::{Match as DbMatch, NewMatch as DbNewMatch};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, MatchReader, MatchWriter};

impl MatchReader for DieselRepository {
    fn list_matches(&self, researcher: &Researcher) -> RepositoryResult<Vec<Match>> {
        use crate::schema::matches;

        let mut conn = self.conn()?;

        let query = matches::table.order(matches::rank.asc());
        let result = match researcher.researcher_type {
            ResearcherType::Internal => query
                .filter(matches::internal_id.eq(researcher.id))
                .load::<DbMatch>(&mut conn)?,
            ResearcherType::External => query
                .filter(matches::external_id.eq(researcher.id))
                .load::<DbMatch>(&mut conn)?,
        };

        Ok(result.into_iter().map(Match::from).collect())
    }
}

impl MatchWriter for DieselRepository {
    fn replace_matches(&self, matches: &[NewMatch]) -> RepositoryResult<usize> {
        use crate::schema::matches as matches_table;

        let mut conn = self.conn()?;

        let rows = matches.iter().map(DbNewMatch::from).collect::<Vec<_>>();

        let inserted = conn.transaction(|conn| {
            diesel::delete(matches_table::table).execute(conn)?;
            if rows.is_empty() {
                return Ok::<usize, RepositoryError>(0);
            }
            Ok(diesel::insert_into(matches_table::table)
                .values(&rows)
                .execute(conn)?)
        })?;

        Ok(inserted)
    }

    fn replace_matches_for(
        &self,
        source: &Researcher,
        matches: &[NewMatch],
    ) -> RepositoryResult<usize> {
        use crate::schema::matches as matches_table;

        let mut conn = self.conn()?;

        let rows = matches.iter().map(DbNewMatch::from).collect::<Vec<_>>();

        let inserted = conn.transaction(|conn| {
            match source.researcher_type {
                ResearcherType::Internal => diesel::delete(
                    matches_table::table.filter(matches_table::internal_id.eq(source.id)),
                )
                .execute(conn)?,
                ResearcherType::External => diesel::delete(
                    matches_table::table.filter(matches_table::external_id.eq(source.id)),
                )
                .execute(conn)?,
            };
            if rows.is_empty() {
                return Ok::<usize, RepositoryError>(0);
            }
            Ok(diesel::insert_into(matches_table::table)
                .values(&rows)
                .execute(conn)?)
        })?;

        Ok(inserted)
    }
}
