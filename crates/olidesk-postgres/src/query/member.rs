//! Member repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::MemberSummary;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for member read operations.
pub trait MemberRepository {
    /// Lists every member with its user's name and email, ordered by name.
    fn list_members(&mut self) -> impl Future<Output = PgResult<Vec<MemberSummary>>> + Send;
}

impl MemberRepository for PgConnection {
    async fn list_members(&mut self) -> PgResult<Vec<MemberSummary>> {
        use schema::{members, users};

        let members = members::table
            .inner_join(users::table)
            .select((members::id, users::name, users::email, members::role))
            .order((users::name.asc(), members::id.asc()))
            .load::<MemberSummary>(self)
            .await
            .map_err(PgError::from)?;

        Ok(members)
    }
}
