use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::match_result::{Match as DomainMatch, NewMatch as DomainNewMatch};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::matches)]
pub struct Match {
    pub id: i32,
    pub internal_id: i32,
    pub external_id: i32,
    pub rank: i32,
    pub score: f32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::matches)]
pub struct NewMatch {
    pub internal_id: i32,
    pub external_id: i32,
    pub rank: i32,
    pub score: f32,
}

impl From<Match> for DomainMatch {
    fn from(db: Match) -> Self {
        DomainMatch {
            id: db.id,
            internal_id: db.internal_id,
            external_id: db.external_id,
            rank: db.rank,
            score: db.score,
        }
    }
}

impl From<&DomainNewMatch> for NewMatch {
    fn from(new: &DomainNewMatch) -> Self {
        NewMatch {
            internal_id: new.internal_id,
            external_id: new.external_id,
            rank: new.rank,
            score: new.score,
        }
    }
}
