//! Form repository for service tickets and their technicians.

use std::collections::HashMap;
use std::future::Future;

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::model::{Form, FormDetails, NewForm, NewFormTechnician, TechnicianSummary, UpdateForm};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for form database operations.
///
/// A form owns its technician assignments: creating a form writes both, and
/// an update that carries a technician list swaps the whole set atomically.
pub trait FormRepository {
    /// Inserts a form and assigns the given members in one transaction.
    fn create_form(
        &mut self,
        form: NewForm,
        technician_ids: Vec<Uuid>,
    ) -> impl Future<Output = PgResult<Form>> + Send;

    /// Finds a form row by its unique identifier.
    fn find_form_by_id(
        &mut self,
        form_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Form>>> + Send;

    /// Finds a form with its client name and technicians resolved.
    fn find_form_details(
        &mut self,
        form_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<FormDetails>>> + Send;

    /// Lists all forms with details, newest first.
    fn list_form_details(&mut self) -> impl Future<Output = PgResult<Vec<FormDetails>>> + Send;

    /// Applies a sparse update and, when `technician_ids` is set, replaces
    /// the technician set. Both happen in one transaction.
    fn update_form(
        &mut self,
        form_id: Uuid,
        changes: UpdateForm,
        technician_ids: Option<Vec<Uuid>>,
    ) -> impl Future<Output = PgResult<Form>> + Send;

    /// Deletes a form; technician assignments cascade.
    ///
    /// Returns whether a row was removed.
    fn delete_form(&mut self, form_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;
}

impl FormRepository for PgConnection {
    async fn create_form(&mut self, form: NewForm, technician_ids: Vec<Uuid>) -> PgResult<Form> {
        use schema::{form_technicians, forms};

        let form = self
            .transaction(|conn| {
                async move {
                    let form = diesel::insert_into(forms::table)
                        .values(&form)
                        .returning(Form::as_returning())
                        .get_result(conn)
                        .await?;

                    let assignments = NewFormTechnician::for_members(form.id, &technician_ids);
                    if !assignments.is_empty() {
                        diesel::insert_into(form_technicians::table)
                            .values(&assignments)
                            .execute(conn)
                            .await?;
                    }

                    Ok::<_, PgError>(form)
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            form_id = %form.id,
            client_id = %form.client_id,
            "Form created"
        );

        Ok(form)
    }

    async fn find_form_by_id(&mut self, form_id: Uuid) -> PgResult<Option<Form>> {
        use schema::forms::dsl::*;

        let form = forms
            .find(form_id)
            .select(Form::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(form)
    }

    async fn find_form_details(&mut self, form_id: Uuid) -> PgResult<Option<FormDetails>> {
        use schema::{clients, forms};

        let row: Option<(Form, String)> = forms::table
            .inner_join(clients::table)
            .filter(forms::id.eq(form_id))
            .select((Form::as_select(), clients::client_name))
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let technicians = load_technicians(self, vec![form_id]).await?;
        Ok(assemble_details(vec![row], technicians).pop())
    }

    async fn list_form_details(&mut self) -> PgResult<Vec<FormDetails>> {
        use schema::{clients, forms};

        let rows: Vec<(Form, String)> = forms::table
            .inner_join(clients::table)
            .select((Form::as_select(), clients::client_name))
            .order((forms::created_at.desc(), forms::id.asc()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let form_ids = rows.iter().map(|(form, _)| form.id).collect();
        let technicians = load_technicians(self, form_ids).await?;

        Ok(assemble_details(rows, technicians))
    }

    async fn update_form(
        &mut self,
        form_id: Uuid,
        changes: UpdateForm,
        technician_ids: Option<Vec<Uuid>>,
    ) -> PgResult<Form> {
        use schema::{form_technicians, forms};

        let replaced = technician_ids.as_ref().map(Vec::len);
        let form = self
            .transaction(|conn| {
                async move {
                    let form = diesel::update(forms::table.find(form_id))
                        .set(&changes)
                        .returning(Form::as_returning())
                        .get_result(conn)
                        .await?;

                    if let Some(member_ids) = technician_ids {
                        diesel::delete(
                            form_technicians::table
                                .filter(form_technicians::form_id.eq(form_id)),
                        )
                        .execute(conn)
                        .await?;

                        let assignments = NewFormTechnician::for_members(form_id, &member_ids);
                        if !assignments.is_empty() {
                            diesel::insert_into(form_technicians::table)
                                .values(&assignments)
                                .execute(conn)
                                .await?;
                        }
                    }

                    Ok::<_, PgError>(form)
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            form_id = %form.id,
            technicians_replaced = ?replaced,
            "Form updated"
        );

        Ok(form)
    }

    async fn delete_form(&mut self, form_id: Uuid) -> PgResult<bool> {
        use schema::forms::dsl::*;

        let deleted = diesel::delete(forms.find(form_id))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}

/// Loads the technicians assigned to any of the given forms, ordered by name.
async fn load_technicians(
    conn: &mut PgConnection,
    form_ids: Vec<Uuid>,
) -> PgResult<Vec<TechnicianSummary>> {
    use schema::{form_technicians, members, users};

    let technicians = form_technicians::table
        .inner_join(members::table.inner_join(users::table))
        .filter(form_technicians::form_id.eq_any(form_ids))
        .select((
            form_technicians::form_id,
            members::id,
            users::name,
            users::email,
        ))
        .order((users::name.asc(), members::id.asc()))
        .load::<TechnicianSummary>(conn)
        .await
        .map_err(PgError::from)?;

    Ok(technicians)
}

/// Groups technicians under their forms, preserving both orderings.
fn assemble_details(
    rows: Vec<(Form, String)>,
    technicians: Vec<TechnicianSummary>,
) -> Vec<FormDetails> {
    let mut by_form: HashMap<Uuid, Vec<TechnicianSummary>> = HashMap::new();
    for technician in technicians {
        by_form.entry(technician.form_id).or_default().push(technician);
    }

    rows.into_iter()
        .map(|(form, client_name)| FormDetails {
            technicians: by_form.remove(&form.id).unwrap_or_default(),
            form,
            client_name,
        })
        .collect()
}
