//! Embedded schema migrations.

mod migrate_result;
mod run_migration;

use std::future::Future;

pub use migrate_result::MigrationResult;
pub use run_migration::run_pending_migrations;

use crate::{PgClient, PgResult};

/// Extension trait adding migration support to [`PgClient`].
pub trait PgClientExt {
    /// Applies every embedded migration that the database has not seen yet.
    ///
    /// Safe to call on every start; an up-to-date schema is a no-op.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;
}

impl PgClientExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        run_pending_migrations(self).await
    }
}
