//! User repository for account management.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::model::{Member, NewMember, NewUser, UpdateUser, User};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for user database operations.
pub trait UserRepository {
    /// Creates a user and its member row in one transaction.
    fn create_user_with_member(
        &mut self,
        user: NewUser,
        role: String,
    ) -> impl Future<Output = PgResult<(User, Member)>> + Send;

    /// Finds a user by its unique identifier.
    fn find_user_by_id(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by its (already normalized) email.
    fn find_user_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds the member row owned by a user.
    fn find_member_by_user_id(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Member>>> + Send;

    /// Applies a sparse update to a user.
    fn update_user(
        &mut self,
        user_id: Uuid,
        changes: UpdateUser,
    ) -> impl Future<Output = PgResult<User>> + Send;

    /// Deletes a user; member and technician rows cascade.
    ///
    /// Returns whether a row was removed.
    fn delete_user(&mut self, user_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;
}

impl UserRepository for PgConnection {
    async fn create_user_with_member(
        &mut self,
        user: NewUser,
        role: String,
    ) -> PgResult<(User, Member)> {
        use schema::{members, users};

        let (user, member) = self
            .transaction(|conn| {
                async move {
                    let user = diesel::insert_into(users::table)
                        .values(&user)
                        .returning(User::as_returning())
                        .get_result(conn)
                        .await?;

                    let new_member = NewMember {
                        user_id: user.id,
                        role,
                    };
                    let member = diesel::insert_into(members::table)
                        .values(&new_member)
                        .returning(Member::as_returning())
                        .get_result(conn)
                        .await?;

                    Ok::<_, PgError>((user, member))
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            user_id = %user.id,
            member_id = %member.id,
            "User and member created"
        );

        Ok((user, member))
    }

    async fn find_user_by_id(&mut self, user_id: Uuid) -> PgResult<Option<User>> {
        use schema::users::dsl::*;

        let user = users
            .find(user_id)
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(user)
    }

    async fn find_user_by_email(&mut self, user_email: &str) -> PgResult<Option<User>> {
        use schema::users::dsl::*;

        let user = users
            .filter(email.eq(user_email))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(user)
    }

    async fn find_member_by_user_id(&mut self, owner_id: Uuid) -> PgResult<Option<Member>> {
        use schema::members::dsl::*;

        let member = members
            .filter(user_id.eq(owner_id))
            .select(Member::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(member)
    }

    async fn update_user(&mut self, user_id: Uuid, changes: UpdateUser) -> PgResult<User> {
        use schema::users::dsl::*;

        let user = diesel::update(users.find(user_id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(user)
    }

    async fn delete_user(&mut self, user_id: Uuid) -> PgResult<bool> {
        use schema::users::dsl::*;

        let deleted = diesel::delete(users.find(user_id))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
