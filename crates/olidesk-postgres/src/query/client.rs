//! Client repository for customer records.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Client, NewClient, UpdateClient};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for client database operations.
pub trait ClientRepository {
    /// Inserts a new client.
    fn create_client(
        &mut self,
        client: NewClient,
    ) -> impl Future<Output = PgResult<Client>> + Send;

    /// Finds a client by its unique identifier.
    fn find_client_by_id(
        &mut self,
        client_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Client>>> + Send;

    /// Lists all clients, newest first.
    fn list_clients(&mut self) -> impl Future<Output = PgResult<Vec<Client>>> + Send;

    /// Applies a sparse update to a client.
    fn update_client(
        &mut self,
        client_id: Uuid,
        changes: UpdateClient,
    ) -> impl Future<Output = PgResult<Client>> + Send;

    /// Deletes a client. Returns whether a row was removed.
    ///
    /// Fails with the `forms_client_id_fkey` violation while forms still
    /// reference the client.
    fn delete_client(&mut self, client_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;
}

impl ClientRepository for PgConnection {
    async fn create_client(&mut self, client: NewClient) -> PgResult<Client> {
        use schema::clients;

        let client = diesel::insert_into(clients::table)
            .values(&client)
            .returning(Client::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(client)
    }

    async fn find_client_by_id(&mut self, client_id: Uuid) -> PgResult<Option<Client>> {
        use schema::clients::dsl::*;

        let client = clients
            .find(client_id)
            .select(Client::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(client)
    }

    async fn list_clients(&mut self) -> PgResult<Vec<Client>> {
        use schema::clients::dsl::*;

        let all = clients
            .select(Client::as_select())
            .order((created_at.desc(), id.asc()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(all)
    }

    async fn update_client(&mut self, client_id: Uuid, changes: UpdateClient) -> PgResult<Client> {
        use schema::clients::dsl::*;

        let client = diesel::update(clients.find(client_id))
            .set(&changes)
            .returning(Client::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(client)
    }

    async fn delete_client(&mut self, client_id: Uuid) -> PgResult<bool> {
        use schema::clients::dsl::*;

        let deleted = diesel::delete(clients.find(client_id))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
