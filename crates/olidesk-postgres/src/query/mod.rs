//! Repository traits implemented on [`PgConnection`].
//!
//! Every trait method returns a `Send` future so repositories can be used
//! from axum handlers. Multi-statement writes (a user with its member row, a
//! form with its technicians) run inside a single transaction.
//!
//! [`PgConnection`]: crate::PgConnection

mod client;
mod form;
mod member;
mod user;

pub use client::ClientRepository;
pub use form::FormRepository;
pub use member::MemberRepository;
pub use user::UserRepository;
