//! Application state and dependency injection.

mod config;
pub mod security;
pub mod workflow;

use olidesk_geocode::GeocodeService;
use olidesk_postgres::{PgClient, PgConnection};

pub use crate::service::config::{BootstrapUserConfig, ServiceConfig};
use crate::service::security::{PasswordHasher, SessionKeys, TokenService};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Tracing target for application state assembly.
const TRACING_TARGET: &str = "olidesk_server::service";

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,
    pub geocode: GeocodeService,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
    pub token_service: TokenService,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to the database, applies migrations, builds the geocoding
    /// client, loads the signing keys and creates the bootstrap user.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let service_state = Self::new(
            config.connect_postgres().await?,
            config.connect_geocode()?,
            config.load_session_keys()?,
        );

        service_state
            .ensure_bootstrap_user(&config.bootstrap_user)
            .await?;

        tracing::info!(target: TRACING_TARGET, "Service state initialized");
        Ok(service_state)
    }

    /// Assembles state from already constructed services.
    pub fn new(postgres: PgClient, geocode: GeocodeService, session_keys: SessionKeys) -> Self {
        Self {
            postgres,
            geocode,

            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(session_keys.clone()),
            session_keys,
        }
    }

    async fn ensure_bootstrap_user(&self, config: &BootstrapUserConfig) -> Result<()> {
        if !config.is_complete() {
            return Ok(());
        }

        let mut conn = self.postgres.get_connection().await?;
        let conn: &mut PgConnection = &mut conn;

        workflow::users::ensure_bootstrap_user(conn, &self.password_hasher, config)
            .await
            .map_err(|e| {
                Error::internal("bootstrap", "Failed to create the bootstrap user").with_source(e)
            })?;

        Ok(())
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);
impl_di!(geocode: GeocodeService);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
impl_di!(token_service: TokenService);
