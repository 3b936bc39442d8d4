//! Reqwest-backed portal login.
//!
//! Posts `{"account","password"}` to `{base}/login` and decodes the session
//! the portal returns. Credentials are only ever written to the request body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use super::dto::{LoginResponseDto, PortalErrorDto};
use super::transport::{build_client, directory_base, endpoint, status_message};
use crate::domain::ports::{SessionAuthenticator, SessionAuthenticatorError};
use crate::domain::{LoginCredentials, PortalSession};

#[derive(Serialize)]
struct LoginBody<'a> {
    account: &'a str,
    password: &'a str,
}

/// Session authenticator that delegates to the portal's login endpoint.
pub struct PortalHttpAuthenticator {
    client: Client,
    base: Url,
}

impl PortalHttpAuthenticator {
    /// Build an authenticator using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            base: directory_base(base),
        })
    }
}

#[async_trait]
impl SessionAuthenticator for PortalHttpAuthenticator {
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<PortalSession, SessionAuthenticatorError> {
        let url = endpoint(&self.base, "login").map_err(|error| {
            SessionAuthenticatorError::unavailable(format!("invalid login endpoint: {error}"))
        })?;
        let response = self
            .client
            .post(url)
            .json(&LoginBody {
                account: credentials.account(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(|error| SessionAuthenticatorError::unavailable(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| SessionAuthenticatorError::unavailable(error.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: LoginResponseDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            SessionAuthenticatorError::unavailable(format!("invalid login response: {error}"))
        })?;
        decoded
            .into_domain_session()
            .map_err(SessionAuthenticatorError::unavailable)
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SessionAuthenticatorError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            let message = serde_json::from_slice::<PortalErrorDto>(body)
                .map(|dto| dto.error)
                .unwrap_or_else(|_| "invalid credentials".to_owned());
            SessionAuthenticatorError::rejected(message)
        }
        _ => SessionAuthenticatorError::unavailable(status_message(status, body)),
    }
}
