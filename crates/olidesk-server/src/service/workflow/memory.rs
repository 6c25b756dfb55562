//! In-memory repositories and a stub geocoder for workflow tests.
//!
//! The store mirrors the constraints of the Postgres schema that the
//! workflows depend on: the unique user email, the form to client and
//! technician to member foreign keys, and the cascades on delete. Failing
//! writes leave the store untouched, like a rolled back transaction.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};
use jiff_diesel::Timestamp;
use olidesk_geocode::{
    AddressQuery, Coordinates, Error as GeocodeError, ErrorKind as GeocodeErrorKind,
    GeocodeProvider, GeocodeService,
};
use olidesk_postgres::error::DieselError;
use olidesk_postgres::model::{
    Client, Form, FormDetails, Member, MemberSummary, NewClient, NewForm, NewUser,
    TechnicianSummary, UpdateClient, UpdateForm, UpdateUser, User,
};
use olidesk_postgres::query::{ClientRepository, FormRepository, MemberRepository, UserRepository};
use olidesk_postgres::types::ClientType;
use olidesk_postgres::{PgError, PgResult};
use uuid::Uuid;

use crate::service::security::CallerIdentity;

/// A caller for workflow calls that do not care who is calling.
pub fn caller() -> CallerIdentity {
    CallerIdentity::new(Uuid::new_v4(), "admin@olidesk.com")
}

fn now() -> Timestamp {
    jiff::Timestamp::now().into()
}

#[derive(Debug)]
struct ConstraintInfo(&'static str);

impl DatabaseErrorInformation for ConstraintInfo {
    fn message(&self) -> &str {
        "constraint violated"
    }

    fn details(&self) -> Option<&str> {
        None
    }

    fn hint(&self) -> Option<&str> {
        None
    }

    fn table_name(&self) -> Option<&str> {
        None
    }

    fn column_name(&self) -> Option<&str> {
        None
    }

    fn constraint_name(&self) -> Option<&str> {
        Some(self.0)
    }

    fn statement_position(&self) -> Option<i32> {
        None
    }
}

fn violation(kind: DatabaseErrorKind, constraint: &'static str) -> PgError {
    PgError::Query(DieselError::DatabaseError(
        kind,
        Box::new(ConstraintInfo(constraint)),
    ))
}

fn not_found() -> PgError {
    PgError::Query(DieselError::NotFound)
}

/// Repository state held in plain vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Vec<User>,
    members: Vec<Member>,
    clients: Vec<Client>,
    forms: Vec<Form>,
    /// `(form_id, member_id)` pairs.
    technicians: Vec<(Uuid, Uuid)>,
}

impl MemoryStore {
    /// Inserts a client with a placeholder address and returns its id.
    pub fn seed_client(&mut self, client_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.clients.push(Client {
            id,
            client_name: client_name.to_owned(),
            client_type: ClientType::Juridica,
            cnpj_or_cpf: "12.345.678/0001-90".to_owned(),
            contact_name: "Contact".to_owned(),
            contact_email: "contact@example.com".to_owned(),
            contact_phone: "+55 11 90000-0000".to_owned(),
            postal_code: "01310-100".to_owned(),
            neighborhood: "Bela Vista".to_owned(),
            country: "Brasil".to_owned(),
            state: "SP".to_owned(),
            city: "São Paulo".to_owned(),
            street: "Avenida Paulista".to_owned(),
            number: "1000".to_owned(),
            complement: None,
            latitude: Some(-23.55),
            longitude: Some(-46.63),
            created_at: now(),
            updated_at: now(),
        });
        id
    }

    /// Inserts a user with its member row and returns the member id.
    pub fn seed_member(&mut self, name: &str, email: &str) -> Uuid {
        let user_id = Uuid::new_v4();
        self.users.push(User {
            id: user_id,
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash: String::new(),
            created_at: now(),
            updated_at: now(),
        });

        let member_id = Uuid::new_v4();
        self.members.push(Member {
            id: member_id,
            user_id,
            role: "technician".to_owned(),
            created_at: now(),
        });
        member_id
    }

    /// Returns the number of stored technician assignments.
    pub fn technician_rows(&self) -> usize {
        self.technicians.len()
    }

    fn check_technicians(&self, member_ids: &[Uuid]) -> PgResult<()> {
        for (index, member_id) in member_ids.iter().enumerate() {
            if !self.members.iter().any(|m| m.id == *member_id) {
                return Err(violation(
                    DatabaseErrorKind::ForeignKeyViolation,
                    "form_technicians_member_id_fkey",
                ));
            }

            if member_ids[..index].contains(member_id) {
                return Err(violation(
                    DatabaseErrorKind::UniqueViolation,
                    "form_technicians_pkey",
                ));
            }
        }
        Ok(())
    }

    fn check_client(&self, client_id: Uuid) -> PgResult<()> {
        if self.clients.iter().any(|c| c.id == client_id) {
            Ok(())
        } else {
            Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "forms_client_id_fkey",
            ))
        }
    }

    fn details(&self, form: &Form) -> FormDetails {
        let client_name = self
            .clients
            .iter()
            .find(|c| c.id == form.client_id)
            .map(|c| c.client_name.clone())
            .unwrap_or_default();

        let mut technicians: Vec<TechnicianSummary> = self
            .technicians
            .iter()
            .filter(|(form_id, _)| *form_id == form.id)
            .filter_map(|(form_id, member_id)| {
                let member = self.members.iter().find(|m| m.id == *member_id)?;
                let user = self.users.iter().find(|u| u.id == member.user_id)?;
                Some(TechnicianSummary {
                    form_id: *form_id,
                    member_id: member.id,
                    name: user.name.clone(),
                    email: user.email.clone(),
                })
            })
            .collect();
        technicians.sort_by(|a, b| a.name.cmp(&b.name));

        FormDetails {
            form: form.clone(),
            client_name,
            technicians,
        }
    }
}

impl UserRepository for MemoryStore {
    async fn create_user_with_member(
        &mut self,
        user: NewUser,
        role: String,
    ) -> PgResult<(User, Member)> {
        let taken = self
            .users
            .iter()
            .any(|u| u.email.to_lowercase() == user.email.to_lowercase());
        if taken {
            return Err(violation(
                DatabaseErrorKind::UniqueViolation,
                "users_email_unique_idx",
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now(),
            updated_at: now(),
        };
        let member = Member {
            id: Uuid::new_v4(),
            user_id: user.id,
            role,
            created_at: now(),
        };

        self.users.push(user.clone());
        self.members.push(member.clone());
        Ok((user, member))
    }

    async fn find_user_by_id(&mut self, user_id: Uuid) -> PgResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_user_by_email(&mut self, email: &str) -> PgResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .iter()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn find_member_by_user_id(&mut self, user_id: Uuid) -> PgResult<Option<Member>> {
        Ok(self.members.iter().find(|m| m.user_id == user_id).cloned())
    }

    async fn update_user(&mut self, user_id: Uuid, changes: UpdateUser) -> PgResult<User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(not_found)?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(updated_at) = changes.updated_at {
            user.updated_at = updated_at;
        }
        Ok(user.clone())
    }

    async fn delete_user(&mut self, user_id: Uuid) -> PgResult<bool> {
        let before = self.users.len();
        self.users.retain(|u| u.id != user_id);

        let removed_members: Vec<Uuid> = self
            .members
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.id)
            .collect();
        self.members.retain(|m| m.user_id != user_id);
        self.technicians
            .retain(|(_, member_id)| !removed_members.contains(member_id));

        Ok(self.users.len() < before)
    }
}

impl MemberRepository for MemoryStore {
    async fn list_members(&mut self) -> PgResult<Vec<MemberSummary>> {
        let mut members: Vec<MemberSummary> = self
            .members
            .iter()
            .filter_map(|member| {
                let user = self.users.iter().find(|u| u.id == member.user_id)?;
                Some(MemberSummary {
                    id: member.id,
                    name: user.name.clone(),
                    email: user.email.clone(),
                    role: member.role.clone(),
                })
            })
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }
}

impl ClientRepository for MemoryStore {
    async fn create_client(&mut self, client: NewClient) -> PgResult<Client> {
        let client = Client {
            id: Uuid::new_v4(),
            client_name: client.client_name,
            client_type: client.client_type,
            cnpj_or_cpf: client.cnpj_or_cpf,
            contact_name: client.contact_name,
            contact_email: client.contact_email,
            contact_phone: client.contact_phone,
            postal_code: client.postal_code,
            neighborhood: client.neighborhood,
            country: client.country,
            state: client.state,
            city: client.city,
            street: client.street,
            number: client.number,
            complement: client.complement,
            latitude: client.latitude,
            longitude: client.longitude,
            created_at: now(),
            updated_at: now(),
        };

        self.clients.push(client.clone());
        Ok(client)
    }

    async fn find_client_by_id(&mut self, client_id: Uuid) -> PgResult<Option<Client>> {
        Ok(self.clients.iter().find(|c| c.id == client_id).cloned())
    }

    async fn list_clients(&mut self) -> PgResult<Vec<Client>> {
        Ok(self.clients.iter().rev().cloned().collect())
    }

    async fn update_client(&mut self, client_id: Uuid, changes: UpdateClient) -> PgResult<Client> {
        let client = self
            .clients
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or_else(not_found)?;

        changes.apply_to(client);
        Ok(client.clone())
    }

    async fn delete_client(&mut self, client_id: Uuid) -> PgResult<bool> {
        if self.forms.iter().any(|f| f.client_id == client_id) {
            return Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "forms_client_id_fkey",
            ));
        }

        let before = self.clients.len();
        self.clients.retain(|c| c.id != client_id);
        Ok(self.clients.len() < before)
    }
}

impl FormRepository for MemoryStore {
    async fn create_form(&mut self, form: NewForm, technician_ids: Vec<Uuid>) -> PgResult<Form> {
        self.check_client(form.client_id)?;
        self.check_technicians(&technician_ids)?;

        let form = Form {
            id: Uuid::new_v4(),
            client_id: form.client_id,
            opened_at: form.opened_at,
            solicited_by: form.solicited_by,
            difficulty_level: form.difficulty_level,
            defect_description: form.defect_description,
            solution_description: form.solution_description,
            created_at: now(),
            updated_at: now(),
        };

        self.technicians
            .extend(technician_ids.into_iter().map(|member_id| (form.id, member_id)));
        self.forms.push(form.clone());
        Ok(form)
    }

    async fn find_form_by_id(&mut self, form_id: Uuid) -> PgResult<Option<Form>> {
        Ok(self.forms.iter().find(|f| f.id == form_id).cloned())
    }

    async fn find_form_details(&mut self, form_id: Uuid) -> PgResult<Option<FormDetails>> {
        Ok(self
            .forms
            .iter()
            .find(|f| f.id == form_id)
            .map(|form| self.details(form)))
    }

    async fn list_form_details(&mut self) -> PgResult<Vec<FormDetails>> {
        Ok(self.forms.iter().rev().map(|form| self.details(form)).collect())
    }

    async fn update_form(
        &mut self,
        form_id: Uuid,
        changes: UpdateForm,
        technician_ids: Option<Vec<Uuid>>,
    ) -> PgResult<Form> {
        if !self.forms.iter().any(|f| f.id == form_id) {
            return Err(not_found());
        }
        if let Some(client_id) = changes.client_id {
            self.check_client(client_id)?;
        }
        if let Some(ref member_ids) = technician_ids {
            self.check_technicians(member_ids)?;
        }

        if let Some(member_ids) = technician_ids {
            self.technicians.retain(|(id, _)| *id != form_id);
            self.technicians
                .extend(member_ids.into_iter().map(|member_id| (form_id, member_id)));
        }

        let form = self
            .forms
            .iter_mut()
            .find(|f| f.id == form_id)
            .ok_or_else(not_found)?;
        changes.apply_to(form);
        Ok(form.clone())
    }

    async fn delete_form(&mut self, form_id: Uuid) -> PgResult<bool> {
        let before = self.forms.len();
        self.forms.retain(|f| f.id != form_id);
        self.technicians.retain(|(id, _)| *id != form_id);
        Ok(self.forms.len() < before)
    }
}

/// A geocoder that answers every lookup with fixed coordinates, or fails.
#[derive(Debug, Clone, Copy)]
pub struct StubGeocoder(Option<(f64, f64)>);

impl StubGeocoder {
    /// Answers every lookup with the given coordinates.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self(Some((latitude, longitude)))
    }

    /// A service that always resolves to São Paulo (-23.55, -46.63).
    pub fn service() -> GeocodeService {
        Self::at(-23.55, -46.63).into_service()
    }

    /// A service whose upstream is always unavailable.
    pub fn failing() -> GeocodeService {
        Self(None).into_service()
    }

    pub fn into_service(self) -> GeocodeService {
        GeocodeService::new(self)
    }
}

#[async_trait::async_trait]
impl GeocodeProvider for StubGeocoder {
    async fn geocode(&self, _query: &AddressQuery) -> olidesk_geocode::Result<Coordinates> {
        match self.0 {
            Some((latitude, longitude)) => Coordinates::new(latitude, longitude),
            None => Err(GeocodeError::new(GeocodeErrorKind::UpstreamUnavailable)
                .with_message("stub upstream is down")),
        }
    }
}
