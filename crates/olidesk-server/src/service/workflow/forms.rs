//! Form (service ticket) workflow: validation, technician assignment and
//! transactional persistence.

use jiff::Timestamp;
use olidesk_postgres::model::{Form, FormDetails, NewForm, UpdateForm as UpdateFormModel};
use olidesk_postgres::query::{ClientRepository, FormRepository};
use uuid::Uuid;

use super::clients::client_not_found;
use super::validation::{ValidationError, present, require};
use crate::handler::request::{CreateForm, UpdateForm};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::security::CallerIdentity;

/// Tracing target for the form workflow.
const TRACING_TARGET: &str = "olidesk_server::service::forms";

fn form_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("form not found")
        .with_resource("form")
}

/// Checks the create payload, stopping at the first failing rule.
pub fn validate_new_form(request: &CreateForm) -> Result<(), ValidationError> {
    require(&request.defect_description, ValidationError::DefectDescription)?;
    require(&request.difficulty_level, ValidationError::DifficultyLevel)?;
    require(&request.solicited_by, ValidationError::SolicitedBy)?;

    if request.client_id.is_nil() {
        return Err(ValidationError::ClientId);
    }

    if request.technician_ids.is_empty() {
        return Err(ValidationError::Technicians);
    }

    if request.opened_at.is_none() {
        return Err(ValidationError::OpenedAt);
    }

    require(
        &request.solution_description,
        ValidationError::SolutionDescription,
    )?;

    Ok(())
}

/// Removes repeated ids, keeping the first occurrence of each.
pub fn dedup_technicians(technician_ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut unique = Vec::with_capacity(technician_ids.len());
    for id in technician_ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

async fn ensure_client_exists<C>(conn: &mut C, client_id: Uuid) -> Result<()>
where
    C: ClientRepository + Send,
{
    match conn.find_client_by_id(client_id).await? {
        Some(_) => Ok(()),
        None => Err(client_not_found()),
    }
}

/// Validates and stores a new form with its technicians.
///
/// The form and every technician row are written in one transaction; an
/// unknown technician id rolls the whole form back.
pub async fn create_form<C>(
    conn: &mut C,
    caller: &CallerIdentity,
    request: CreateForm,
) -> Result<Form>
where
    C: ClientRepository + FormRepository + Send,
{
    validate_new_form(&request)?;

    let CreateForm {
        technician_ids,
        opened_at,
        client_id,
        solicited_by,
        difficulty_level,
        defect_description,
        solution_description,
    } = request;

    let opened_at = opened_at.ok_or(ValidationError::OpenedAt)?;
    ensure_client_exists(conn, client_id).await?;

    let technician_ids = dedup_technicians(technician_ids);
    let technician_count = technician_ids.len();
    let new_form = NewForm {
        client_id,
        opened_at: opened_at.into(),
        solicited_by: solicited_by.trim().to_owned(),
        difficulty_level: difficulty_level.trim().to_owned(),
        defect_description: defect_description.trim().to_owned(),
        solution_description: solution_description.trim().to_owned(),
    };

    let form = conn.create_form(new_form, technician_ids).await?;

    tracing::info!(
        target: TRACING_TARGET,
        caller_id = %caller.user_id,
        form_id = %form.id,
        client_id = %form.client_id,
        technician_count,
        "Form created"
    );

    Ok(form)
}

/// Returns a form with its client name and technicians.
pub async fn get_form<C>(conn: &mut C, form_id: Uuid) -> Result<FormDetails>
where
    C: FormRepository + Send,
{
    conn.find_form_details(form_id)
        .await?
        .ok_or_else(form_not_found)
}

/// Returns every form with its client name and technicians.
pub async fn list_forms<C>(conn: &mut C) -> Result<Vec<FormDetails>>
where
    C: FormRepository + Send,
{
    Ok(conn.list_form_details().await?)
}

/// Builds the sparse changeset of an update and the replacement technician
/// set, if any.
pub fn form_changes(request: UpdateForm) -> (UpdateFormModel, Option<Vec<Uuid>>) {
    let UpdateForm {
        technician_ids,
        opened_at,
        client_id,
        solicited_by,
        difficulty_level,
        defect_description,
        solution_description,
    } = request;

    let changes = UpdateFormModel {
        client_id: client_id.filter(|id| !id.is_nil()),
        opened_at: opened_at.map(Into::into),
        solicited_by: present(solicited_by),
        difficulty_level: present(difficulty_level),
        defect_description: present(defect_description),
        solution_description: present(solution_description),
        updated_at: Some(Timestamp::now().into()),
    };

    let technicians = technician_ids
        .filter(|ids| !ids.is_empty())
        .map(dedup_technicians);

    (changes, technicians)
}

/// Applies a sparse update to a form.
///
/// A supplied technician list replaces the assigned set in the same
/// transaction as the field changes.
pub async fn update_form<C>(
    conn: &mut C,
    caller: &CallerIdentity,
    form_id: Uuid,
    request: UpdateForm,
) -> Result<Form>
where
    C: ClientRepository + FormRepository + Send,
{
    if conn.find_form_by_id(form_id).await?.is_none() {
        return Err(form_not_found());
    }

    let (changes, technicians) = form_changes(request);
    if let Some(client_id) = changes.client_id {
        ensure_client_exists(conn, client_id).await?;
    }

    let technicians_replaced = technicians.as_ref().map(Vec::len);
    let form = conn.update_form(form_id, changes, technicians).await?;

    tracing::info!(
        target: TRACING_TARGET,
        caller_id = %caller.user_id,
        form_id = %form.id,
        technicians_replaced = ?technicians_replaced,
        "Form updated"
    );

    Ok(form)
}

/// Deletes a form and its technician rows. Deleting a missing form succeeds.
pub async fn delete_form<C>(conn: &mut C, caller: &CallerIdentity, form_id: Uuid) -> Result<()>
where
    C: FormRepository + Send,
{
    let deleted = conn.delete_form(form_id).await?;

    tracing::info!(
        target: TRACING_TARGET,
        caller_id = %caller.user_id,
        form_id = %form_id,
        deleted,
        "Form delete requested"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::workflow::memory::{MemoryStore, caller};

    struct Fixture {
        store: MemoryStore,
        client_id: Uuid,
        alice: Uuid,
        bruno: Uuid,
        carla: Uuid,
    }

    fn fixture() -> Fixture {
        let mut store = MemoryStore::default();
        let client_id = store.seed_client("Padaria Central");
        let alice = store.seed_member("Alice", "alice@olidesk.com");
        let bruno = store.seed_member("Bruno", "bruno@olidesk.com");
        let carla = store.seed_member("Carla", "carla@olidesk.com");

        Fixture {
            store,
            client_id,
            alice,
            bruno,
            carla,
        }
    }

    fn request(client_id: Uuid, technician_ids: Vec<Uuid>) -> CreateForm {
        CreateForm {
            technician_ids,
            opened_at: Some(Timestamp::now()),
            client_id,
            solicited_by: "Ana Souza".into(),
            difficulty_level: "medium".into(),
            defect_description: "Printer jams on every page".into(),
            solution_description: "Replaced the pickup roller".into(),
        }
    }

    fn technician_names(details: &FormDetails) -> Vec<&str> {
        details.technicians.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn validation_reports_first_failing_rule() {
        let mut request = request(Uuid::new_v4(), vec![Uuid::new_v4()]);
        assert_eq!(validate_new_form(&request), Ok(()));

        request.solution_description.clear();
        assert_eq!(
            validate_new_form(&request),
            Err(ValidationError::SolutionDescription)
        );

        request.opened_at = None;
        assert_eq!(validate_new_form(&request), Err(ValidationError::OpenedAt));

        request.technician_ids.clear();
        assert_eq!(
            validate_new_form(&request),
            Err(ValidationError::Technicians)
        );

        request.client_id = Uuid::nil();
        assert_eq!(validate_new_form(&request), Err(ValidationError::ClientId));

        request.solicited_by.clear();
        assert_eq!(validate_new_form(&request), Err(ValidationError::SolicitedBy));

        request.difficulty_level.clear();
        assert_eq!(
            validate_new_form(&request),
            Err(ValidationError::DifficultyLevel)
        );

        request.defect_description.clear();
        assert_eq!(
            validate_new_form(&request),
            Err(ValidationError::DefectDescription)
        );
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(dedup_technicians(vec![b, a, b, c, a]), vec![b, a, c]);
    }

    #[tokio::test]
    async fn create_then_get_resolves_technicians() -> anyhow::Result<()> {
        let Fixture {
            mut store,
            client_id,
            alice,
            bruno,
            ..
        } = fixture();

        let form = create_form(&mut store, &caller(), request(client_id, vec![bruno, alice, bruno]))
            .await?;
        let details = get_form(&mut store, form.id).await?;

        assert_eq!(details.client_name, "Padaria Central");
        assert_eq!(technician_names(&details), ["Alice", "Bruno"]);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_client_is_not_found() -> anyhow::Result<()> {
        let Fixture { mut store, alice, .. } = fixture();

        let Err(error) = create_form(&mut store, &caller(), request(Uuid::new_v4(), vec![alice]))
            .await
        else {
            anyhow::bail!("a missing client must be rejected");
        };
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("client not found"));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_technician_rolls_back() -> anyhow::Result<()> {
        let Fixture {
            mut store,
            client_id,
            alice,
            ..
        } = fixture();

        let Err(error) = create_form(
            &mut store,
            &caller(),
            request(client_id, vec![alice, Uuid::new_v4()]),
        )
        .await
        else {
            anyhow::bail!("an unknown technician must be rejected");
        };

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("invalid technician responsible ID"));
        assert!(list_forms(&mut store).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn updating_one_field_keeps_technicians() -> anyhow::Result<()> {
        let Fixture {
            mut store,
            client_id,
            alice,
            bruno,
            ..
        } = fixture();

        let form =
            create_form(&mut store, &caller(), request(client_id, vec![alice, bruno])).await?;

        let patch = UpdateForm {
            solution_description: Some("Cleaned the fuser".into()),
            defect_description: Some(String::new()),
            ..Default::default()
        };
        update_form(&mut store, &caller(), form.id, patch).await?;

        let details = get_form(&mut store, form.id).await?;
        assert_eq!(details.form.solution_description, "Cleaned the fuser");
        assert_eq!(details.form.defect_description, "Printer jams on every page");
        assert_eq!(technician_names(&details), ["Alice", "Bruno"]);
        Ok(())
    }

    #[tokio::test]
    async fn technician_list_replaces_the_set() -> anyhow::Result<()> {
        let Fixture {
            mut store,
            client_id,
            alice,
            bruno,
            carla,
        } = fixture();

        let form =
            create_form(&mut store, &caller(), request(client_id, vec![alice, bruno])).await?;

        let patch = UpdateForm {
            technician_ids: Some(vec![carla, bruno]),
            ..Default::default()
        };
        update_form(&mut store, &caller(), form.id, patch).await?;

        let details = get_form(&mut store, form.id).await?;
        assert_eq!(technician_names(&details), ["Bruno", "Carla"]);

        let patch = UpdateForm {
            technician_ids: Some(Vec::new()),
            ..Default::default()
        };
        update_form(&mut store, &caller(), form.id, patch).await?;

        let details = get_form(&mut store, form.id).await?;
        assert_eq!(technician_names(&details), ["Bruno", "Carla"]);
        Ok(())
    }

    #[tokio::test]
    async fn update_rechecks_client() -> anyhow::Result<()> {
        let Fixture {
            mut store,
            client_id,
            alice,
            ..
        } = fixture();

        let form = create_form(&mut store, &caller(), request(client_id, vec![alice])).await?;

        let patch = UpdateForm {
            client_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let result = update_form(&mut store, &caller(), form.id, patch).await;
        assert_eq!(result.map(|_| ()).map_err(|e| e.kind()), Err(ErrorKind::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn update_applies_opened_at() -> anyhow::Result<()> {
        let Fixture {
            mut store,
            client_id,
            alice,
            ..
        } = fixture();

        let form = create_form(&mut store, &caller(), request(client_id, vec![alice])).await?;
        let opened_at = Timestamp::from_second(1_700_000_000)?;

        let patch = UpdateForm {
            opened_at: Some(opened_at),
            ..Default::default()
        };
        let updated = update_form(&mut store, &caller(), form.id, patch).await?;
        assert_eq!(jiff::Timestamp::from(updated.opened_at), opened_at);
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> anyhow::Result<()> {
        let Fixture {
            mut store,
            client_id,
            alice,
            ..
        } = fixture();

        let form = create_form(&mut store, &caller(), request(client_id, vec![alice])).await?;
        delete_form(&mut store, &caller(), form.id).await?;
        delete_form(&mut store, &caller(), form.id).await?;

        let missing = get_form(&mut store, form.id).await;
        assert_eq!(missing.map(|_| ()).map_err(|e| e.kind()), Err(ErrorKind::NotFound));
        assert_eq!(store.technician_rows(), 0);
        Ok(())
    }
}
