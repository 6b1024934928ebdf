//! User accounts API client.
//!
//! Proxies login and registration to the remote accounts service. The
//! service reports validation failures (bad credentials, duplicate email)
//! as a JSON body with a `detail` field; that message is carried through
//! verbatim so the frontend can show it next to the relevant form.

use gallery_core::{AccountId, Email};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::AccountsConfig;

/// Errors that can occur when talking to the accounts service.
#[derive(Debug, Error)]
pub enum AccountsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the request (bad credentials, duplicate email).
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
}

/// Access token issued on successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenData {
    pub access_token: String,
    pub token_type: String,
}

/// Profile returned on successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: AccountId,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    firstname: &'a str,
    lastname: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Client for the user accounts API.
#[derive(Clone)]
pub struct AccountsClient {
    client: reqwest::Client,
    base_url: String,
}

impl AccountsClient {
    /// Create a new accounts client.
    #[must_use]
    pub fn new(config: &AccountsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// Exchange credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns `AccountsError::Rejected` with the service's `detail`
    /// message on bad credentials, or `AccountsError::Http` on transport
    /// failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<TokenData, AccountsError> {
        let url = format!("{}/users/login/", self.base_url);
        let body = LoginBody {
            email: email.as_str(),
            password,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AccountsError::Rejected {
                status: status.as_u16(),
                detail: extract_detail(&text),
            });
        }

        Ok(response.json().await?)
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `AccountsError::Rejected` with the service's `detail`
    /// message (e.g., duplicate email), or `AccountsError::Http` on
    /// transport failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        firstname: &str,
        lastname: &str,
        email: &Email,
        password: &str,
    ) -> Result<AccountProfile, AccountsError> {
        let url = format!("{}/users/register/", self.base_url);
        let body = RegisterBody {
            firstname,
            lastname,
            email: email.as_str(),
            password,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AccountsError::Rejected {
                status: status.as_u16(),
                detail: extract_detail(&text),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pull the `detail` message out of an error body, falling back to a
/// generic message when the body is not the expected shape.
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|d| d.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "Something went wrong".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_from_error_body() {
        let body = r#"{"detail": "Email already registered"}"#;
        assert_eq!(extract_detail(body), "Email already registered");
    }

    #[test]
    fn test_extract_detail_falls_back_on_garbage() {
        assert_eq!(extract_detail("<html>bad gateway</html>"), "Something went wrong");
        assert_eq!(extract_detail(""), "Something went wrong");
        assert_eq!(extract_detail(r#"{"error": "nope"}"#), "Something went wrong");
    }

    #[test]
    fn test_token_data_deserializes() {
        let json = r#"{"access_token": "abc123", "token_type": "Bearer"}"#;
        let token: TokenData = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc123");
        assert_eq!(token.token_type, "Bearer");
    }

    #[test]
    fn test_account_profile_deserializes() {
        let json = r#"{"id": 4, "firstname": "Asha", "lastname": "Rao", "email": "asha@example.com"}"#;
        let profile: AccountProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, AccountId::new(4));
        assert_eq!(profile.firstname, "Asha");
    }

    #[test]
    fn test_rejected_error_displays_detail() {
        let err = AccountsError::Rejected {
            status: 401,
            detail: "Invalid email or password".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid email or password");
    }
}
