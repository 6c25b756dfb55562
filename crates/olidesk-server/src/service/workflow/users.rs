//! User workflow: login, registration, profile and bootstrap account.

use jiff::Timestamp;
use olidesk_postgres::model::{Member, NewUser, UpdateUser as UpdateUserModel, User};
use olidesk_postgres::query::UserRepository;

use super::validation::{ValidationError, is_valid_email, normalize_email, present, require};
use crate::handler::request::{CreateUser, Login, UpdateUser};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::BootstrapUserConfig;
use crate::service::security::{CallerIdentity, IssuedToken, PasswordHasher, TokenService};

/// Tracing target for the user workflow.
const TRACING_TARGET: &str = "olidesk_server::service::users";

fn user_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("user not found")
        .with_resource("user")
}

fn invalid_credentials() -> Error<'static> {
    ErrorKind::Unauthorized
        .with_message("invalid credentials")
        .with_resource("authentication")
}

/// Checks the registration payload, stopping at the first failing rule.
pub fn validate_new_user(request: &CreateUser) -> Result<(), ValidationError> {
    require(&request.name, ValidationError::UserName)?;
    if !is_valid_email(request.email.trim()) {
        return Err(ValidationError::UserEmail);
    }
    require(&request.role, ValidationError::UserRole)?;
    require(&request.password, ValidationError::UserPassword)?;
    Ok(())
}

/// Exchanges credentials for a session token.
///
/// An unknown email and a wrong password fail the same way.
pub async fn login<C>(
    conn: &mut C,
    password_hasher: &PasswordHasher,
    tokens: &TokenService,
    request: Login,
) -> Result<IssuedToken>
where
    C: UserRepository + Send,
{
    let email = normalize_email(&request.email);
    let Some(user) = conn.find_user_by_email(&email).await? else {
        password_hasher.verify_dummy_password(&request.password);

        tracing::warn!(
            target: TRACING_TARGET,
            "Login attempt for unknown email"
        );
        return Err(invalid_credentials());
    };

    if let Err(error) = password_hasher.verify_password(&request.password, &user.password_hash) {
        tracing::warn!(
            target: TRACING_TARGET,
            user_id = %user.id,
            "Login attempt with wrong password"
        );

        return Err(match error.kind() {
            ErrorKind::Unauthorized => invalid_credentials(),
            _ => error,
        });
    }

    let token = tokens.issue(user.id, &user.email)?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        "User logged in"
    );

    Ok(token)
}

/// Registers a user and its member row.
pub async fn create_user<C>(
    conn: &mut C,
    password_hasher: &PasswordHasher,
    caller: &CallerIdentity,
    request: CreateUser,
) -> Result<User>
where
    C: UserRepository + Send,
{
    validate_new_user(&request)?;
    let (user, _member) = register(conn, password_hasher, request).await?;

    tracing::info!(
        target: TRACING_TARGET,
        caller_id = %caller.user_id,
        user_id = %user.id,
        "User created"
    );

    Ok(user)
}

async fn register<C>(
    conn: &mut C,
    password_hasher: &PasswordHasher,
    request: CreateUser,
) -> Result<(User, Member)>
where
    C: UserRepository + Send,
{
    let password_hash = password_hasher.hash_password(&request.password)?;
    let new_user = NewUser {
        name: request.name.trim().to_owned(),
        email: normalize_email(&request.email),
        password_hash,
    };

    let role = request.role.trim().to_owned();
    Ok(conn.create_user_with_member(new_user, role).await?)
}

/// Returns the caller's user record and member row.
pub async fn user_details<C>(
    conn: &mut C,
    caller: &CallerIdentity,
) -> Result<(User, Option<Member>)>
where
    C: UserRepository + Send,
{
    let user = conn
        .find_user_by_id(caller.user_id)
        .await?
        .ok_or_else(user_not_found)?;
    let member = conn.find_member_by_user_id(user.id).await?;

    Ok((user, member))
}

/// Applies a sparse update to the caller's profile. The email never changes.
pub async fn update_user<C>(
    conn: &mut C,
    caller: &CallerIdentity,
    request: UpdateUser,
) -> Result<User>
where
    C: UserRepository + Send,
{
    if conn.find_user_by_id(caller.user_id).await?.is_none() {
        return Err(user_not_found());
    }

    let changes = UpdateUserModel {
        name: present(request.name),
        updated_at: Some(Timestamp::now().into()),
    };

    let user = conn.update_user(caller.user_id, changes).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        "User updated"
    );

    Ok(user)
}

/// Deletes the caller's account. Deleting a missing account succeeds.
pub async fn delete_user<C>(conn: &mut C, caller: &CallerIdentity) -> Result<()>
where
    C: UserRepository + Send,
{
    let deleted = conn.delete_user(caller.user_id).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %caller.user_id,
        deleted,
        "User delete requested"
    );

    Ok(())
}

/// Creates the configured bootstrap account if it does not exist yet.
///
/// Returns the new user, or `None` when nothing was configured or the
/// account already exists.
pub async fn ensure_bootstrap_user<C>(
    conn: &mut C,
    password_hasher: &PasswordHasher,
    config: &BootstrapUserConfig,
) -> Result<Option<User>>
where
    C: UserRepository + Send,
{
    let Some(request) = config.to_request() else {
        tracing::debug!(
            target: TRACING_TARGET,
            "No bootstrap user configured"
        );
        return Ok(None);
    };

    validate_new_user(&request)?;

    let email = normalize_email(&request.email);
    if conn.find_user_by_email(&email).await?.is_some() {
        tracing::debug!(
            target: TRACING_TARGET,
            "Bootstrap user already exists"
        );
        return Ok(None);
    }

    let (user, _member) = register(conn, password_hasher, request).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        "Bootstrap user created"
    );

    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::service::security::{SessionKeys, SessionKeysConfig};
    use crate::service::workflow::memory::{MemoryStore, caller};

    fn tokens() -> anyhow::Result<TokenService> {
        let keys = SessionKeys::from_config(&SessionKeysConfig::new("workflow-test-secret"))?;
        Ok(TokenService::new(keys))
    }

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: "Ana Souza".into(),
            email: email.into(),
            password: "correct horse battery".into(),
            role: "technician".into(),
        }
    }

    #[test]
    fn validation_reports_first_failing_rule() {
        let mut request = new_user("ana@olidesk.com");
        assert_eq!(validate_new_user(&request), Ok(()));

        request.password.clear();
        assert_eq!(validate_new_user(&request), Err(ValidationError::UserPassword));

        request.role.clear();
        assert_eq!(validate_new_user(&request), Err(ValidationError::UserRole));

        request.email = "ana".into();
        assert_eq!(validate_new_user(&request), Err(ValidationError::UserEmail));

        request.name.clear();
        assert_eq!(validate_new_user(&request), Err(ValidationError::UserName));
    }

    #[tokio::test]
    async fn create_then_login() -> anyhow::Result<()> {
        let mut store = MemoryStore::default();
        let hasher = PasswordHasher::new();
        let tokens = tokens()?;

        let user = create_user(&mut store, &hasher, &caller(), new_user(" Ana@Olidesk.com ")).await?;
        assert_eq!(user.email, "ana@olidesk.com");
        assert_ne!(user.password_hash, "correct horse battery");

        let login_request = Login {
            email: "ANA@olidesk.com".into(),
            password: "correct horse battery".into(),
        };
        let token = login(&mut store, &hasher, &tokens, login_request).await?;
        assert_eq!(token.expires_in, 86_400);

        let claims = tokens.verify(&token.access_token)?;
        assert_eq!(claims.user_id, user.id.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn wrong_email_and_wrong_password_look_the_same() -> anyhow::Result<()> {
        let mut store = MemoryStore::default();
        let hasher = PasswordHasher::new();
        let tokens = tokens()?;
        create_user(&mut store, &hasher, &caller(), new_user("ana@olidesk.com")).await?;

        let attempts = [
            ("nobody@olidesk.com", "correct horse battery"),
            ("ana@olidesk.com", "wrong"),
        ];

        for (email, password) in attempts {
            let request = Login {
                email: email.into(),
                password: password.into(),
            };
            let Err(error) = login(&mut store, &hasher, &tokens, request).await else {
                anyhow::bail!("login with {email} must fail");
            };
            assert_eq!(error.kind(), ErrorKind::Unauthorized);
            assert_eq!(error.message(), Some("invalid credentials"));
        }
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() -> anyhow::Result<()> {
        let mut store = MemoryStore::default();
        let hasher = PasswordHasher::new();
        create_user(&mut store, &hasher, &caller(), new_user("ana@olidesk.com")).await?;

        let Err(error) =
            create_user(&mut store, &hasher, &caller(), new_user("ANA@olidesk.com")).await
        else {
            anyhow::bail!("a duplicate email must be rejected");
        };
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.message(), Some("duplicated email or username"));
        Ok(())
    }

    #[tokio::test]
    async fn details_update_and_delete() -> anyhow::Result<()> {
        let mut store = MemoryStore::default();
        let hasher = PasswordHasher::new();
        let user = create_user(&mut store, &hasher, &caller(), new_user("ana@olidesk.com")).await?;
        let me = CallerIdentity::new(user.id, &user.email);

        let (details, member) = user_details(&mut store, &me).await?;
        assert_eq!(details.name, "Ana Souza");
        assert_eq!(member.map(|m| m.role).as_deref(), Some("technician"));

        let patch = UpdateUser {
            name: Some("Ana Lima".into()),
            email: Some("other@olidesk.com".into()),
        };
        let updated = update_user(&mut store, &me, patch).await?;
        assert_eq!(updated.name, "Ana Lima");
        assert_eq!(updated.email, "ana@olidesk.com");

        let updated = update_user(&mut store, &me, UpdateUser::default()).await?;
        assert_eq!(updated.name, "Ana Lima");

        delete_user(&mut store, &me).await?;
        delete_user(&mut store, &me).await?;

        let missing = user_details(&mut store, &me).await;
        assert_eq!(missing.map(|_| ()).map_err(|e| e.kind()), Err(ErrorKind::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn bootstrap_user_is_created_once() -> anyhow::Result<()> {
        let mut store = MemoryStore::default();
        let hasher = PasswordHasher::new();
        let config = BootstrapUserConfig {
            bootstrap_user_name: Some("Admin".into()),
            bootstrap_user_email: Some("admin@olidesk.com".into()),
            bootstrap_user_password: Some("change-me-now".into()),
            bootstrap_user_role: Some("admin".into()),
        };

        let created = ensure_bootstrap_user(&mut store, &hasher, &config).await?;
        assert!(created.is_some());

        let again = ensure_bootstrap_user(&mut store, &hasher, &config).await?;
        assert!(again.is_none());

        let skipped =
            ensure_bootstrap_user(&mut store, &hasher, &BootstrapUserConfig::default()).await?;
        assert!(skipped.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn details_for_unknown_caller_is_not_found() {
        let mut store = MemoryStore::default();
        let stranger = CallerIdentity::new(Uuid::new_v4(), "ghost@olidesk.com");

        let result = user_details(&mut store, &stranger).await;
        assert_eq!(result.map(|_| ()).map_err(|e| e.kind()), Err(ErrorKind::NotFound));
    }
}
