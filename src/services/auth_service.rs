use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::{
    dto::auth::{LoginRequest, LoginResponse},
    error::{AppError, AppResult, AuthError},
    models::User,
    state::AppState,
};

/// Verify the credentials and issue a token. Unknown usernames are registered
/// on the spot when auto-registration is enabled.
pub async fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<LoginResponse> {
    let username = payload.username.as_deref().map(str::trim).unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let user = match state.store.find_user(username).await? {
        Some(user) => {
            verify_password(&user, &password)?;
            user
        }
        None if state.auth.auto_register => register_user(state, username, &password).await?,
        None => return Err(AuthError::InvalidCredentials.into()),
    };

    let token = state.tokens.issue(user.id, &user.username)?;
    tracing::info!(user_id = user.id, "user logged in");
    Ok(LoginResponse { token })
}

async fn register_user(state: &AppState, username: &str, password: &str) -> AppResult<User> {
    let password_hash = hash_password(password)?;
    match state.store.create_user(username, &password_hash).await? {
        Some(user) => {
            tracing::info!(user_id = user.id, "user registered on first login");
            Ok(user)
        }
        None => {
            // Lost a race with a concurrent first login for the same name.
            let user = state
                .store
                .find_user(username)
                .await?
                .ok_or(AuthError::InvalidCredentials)?;
            verify_password(&user, password)?;
            Ok(user)
        }
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

fn verify_password(user: &User, password: &str) -> AppResult<()> {
    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::debug!(user_id = user.id, "password mismatch");
        return Err(AuthError::InvalidCredentials.into());
    }
    Ok(())
}
