//! Authentication route handlers.
//!
//! Login and registration proxy to the remote accounts service; the only
//! state kept here is the session user with their access token.

use axum::{Json, extract::State};
use gallery_core::Email;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// Logged-in user payload.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub email: String,
}

fn parse_email(raw: &str) -> Result<Email> {
    Email::parse(raw).map_err(|err| AppError::BadRequest(err.to_string()))
}

/// Exchange credentials for a session.
///
/// On success the access token is stored in the session and the user is
/// attached to the error reporting scope.
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionUser>> {
    let email = parse_email(&request.email)?;

    let token = state.accounts().login(&email, &request.password).await?;

    let user = CurrentUser {
        email: email.clone(),
        access_token: token.access_token,
    };
    session
        .insert(session_keys::CURRENT_USER, &user)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to save user to session: {e}")))?;

    set_sentry_user(email.as_str());
    tracing::info!(email = %email, "User logged in");

    Ok(Json(SessionUser {
        email: email.into_string(),
    }))
}

/// Create a new account, then log it in.
#[instrument(skip(state, session, request))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<SessionUser>> {
    let email = parse_email(&request.email)?;

    if request.firstname.trim().is_empty() || request.lastname.trim().is_empty() {
        return Err(AppError::BadRequest(
            "First and last name are required".to_string(),
        ));
    }

    let profile = state
        .accounts()
        .register(
            request.firstname.trim(),
            request.lastname.trim(),
            &email,
            &request.password,
        )
        .await?;
    tracing::info!(account_id = %profile.id, "Account created");

    // Registration does not issue a token; log in with the same credentials
    let token = state.accounts().login(&email, &request.password).await?;

    let user = CurrentUser {
        email: email.clone(),
        access_token: token.access_token,
    };
    session
        .insert(session_keys::CURRENT_USER, &user)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to save user to session: {e}")))?;

    set_sentry_user(email.as_str());

    Ok(Json(SessionUser {
        email: email.into_string(),
    }))
}

/// Clear the session user.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    let _ = session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to clear session: {e}")))?;

    clear_sentry_user();

    Ok(Json(json!({ "message": "Logged out" })))
}
