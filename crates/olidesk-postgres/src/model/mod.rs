//! Database models for all entities in the system.
//!
//! Each table has a queryable model, an insertable `New*` struct and, where
//! rows are mutable, an `Update*` changeset whose `None` fields are skipped.

mod client;
mod form;
mod form_technician;
mod member;
mod user;

pub use client::{Client, NewClient, UpdateClient};
pub use form::{Form, FormDetails, NewForm, UpdateForm};
pub use form_technician::{NewFormTechnician, TechnicianSummary};
pub use member::{Member, MemberSummary, NewMember};
pub use user::{NewUser, UpdateUser, User};
