//! Member model: the role-tagged projection of a user used on tickets.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::members;

/// Member row, one per user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Member {
    /// Unique member identifier, referenced by ticket assignments.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Free-form role tag (e.g. `technician`, `admin`).
    pub role: String,
    /// Timestamp when the member was created.
    pub created_at: Timestamp,
}

/// Data for creating a new member.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMember {
    /// Owning user.
    pub user_id: Uuid,
    /// Role tag.
    pub role: String,
}

/// Member joined with its user's name and email.
#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct MemberSummary {
    /// Member identifier.
    pub id: Uuid,
    /// User display name.
    pub name: String,
    /// User email.
    pub email: String,
    /// Role tag.
    pub role: String,
}
