//! Reqwest-backed portal data source.
//!
//! This adapter owns transport details only: endpoint resolution, the session
//! header, timeout and HTTP error mapping, and JSON decoding into domain
//! payloads. One `GET {base}/{category}` per fetch.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::dto::into_profile;
use super::transport::{
    PORTAL_TOKEN_HEADER, build_client, directory_base, endpoint, status_message,
};
use crate::domain::ports::{PortalDataSource, PortalDataSourceError};
use crate::domain::{
    Attendance, Category, Courses, Marks, SessionToken, Timetable, UserProfile,
};

/// Portal data source performing one HTTP GET per category.
pub struct PortalHttpSource {
    client: Client,
    base: Url,
}

impl PortalHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
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

    async fn fetch_json(
        &self,
        category: Category,
        token: &SessionToken,
    ) -> Result<Value, PortalDataSourceError> {
        let url = endpoint(&self.base, category.key()).map_err(|error| {
            PortalDataSourceError::transport(format!("invalid {category} endpoint: {error}"))
        })?;
        let response = self
            .client
            .get(url)
            .header(PORTAL_TOKEN_HEADER, token.as_ref())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            PortalDataSourceError::decode(format!("invalid {category} JSON payload: {error}"))
        })
    }
}

#[async_trait]
impl PortalDataSource for PortalHttpSource {
    async fn fetch_profile(
        &self,
        token: &SessionToken,
    ) -> Result<UserProfile, PortalDataSourceError> {
        self.fetch_json(Category::Profile, token).await.map(into_profile)
    }

    async fn fetch_attendance(
        &self,
        token: &SessionToken,
    ) -> Result<Attendance, PortalDataSourceError> {
        self.fetch_json(Category::Attendance, token)
            .await
            .map(Attendance::new)
    }

    async fn fetch_marks(&self, token: &SessionToken) -> Result<Marks, PortalDataSourceError> {
        self.fetch_json(Category::Marks, token).await.map(Marks::new)
    }

    async fn fetch_courses(&self, token: &SessionToken) -> Result<Courses, PortalDataSourceError> {
        self.fetch_json(Category::Courses, token)
            .await
            .map(Courses::new)
    }

    async fn fetch_timetable(
        &self,
        token: &SessionToken,
    ) -> Result<Timetable, PortalDataSourceError> {
        self.fetch_json(Category::Timetable, token)
            .await
            .map(Timetable::new)
    }
}

fn map_transport_error(error: reqwest::Error) -> PortalDataSourceError {
    if error.is_timeout() {
        PortalDataSourceError::timeout(error.to_string())
    } else {
        PortalDataSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PortalDataSourceError {
    let message = status_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PortalDataSourceError::unauthorized(message)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PortalDataSourceError::timeout(message)
        }
        _ => PortalDataSourceError::transport(message),
    }
}
