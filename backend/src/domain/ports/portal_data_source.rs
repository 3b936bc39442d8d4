//! Driven port for the per-category portal fetches.
//!
//! Each operation is independent, takes the session token by reference and
//! reports failure through [`PortalDataSourceError`]. Dropping a returned
//! future abandons the fetch; the aggregation engine relies on that for
//! cancellation.

use async_trait::async_trait;
use serde_json::json;

use super::define_port_error;
use crate::domain::{Attendance, Courses, Marks, SessionToken, Timetable, UserProfile};

define_port_error! {
    /// Errors surfaced by portal fetches.
    pub enum PortalDataSourceError {
        /// Network transport failed or the portal answered with an error status.
        Transport { message: String } => "portal transport failed: {message}",
        /// The fetch did not finish in time.
        Timeout { message: String } => "portal request timed out: {message}",
        /// The portal no longer accepts the session token.
        Unauthorized { message: String } => "portal session rejected: {message}",
        /// The portal response could not be decoded.
        Decode { message: String } => "portal response decode failed: {message}",
        /// The fetch was abandoned because a sibling fetch failed.
        Cancelled => "portal fetch cancelled",
    }
}

/// Capability set for fetching every data category.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalDataSource: Send + Sync {
    /// Fetch the user's profile.
    async fn fetch_profile(&self, token: &SessionToken) -> Result<UserProfile, PortalDataSourceError>;

    /// Fetch attendance.
    async fn fetch_attendance(&self, token: &SessionToken)
    -> Result<Attendance, PortalDataSourceError>;

    /// Fetch marks.
    async fn fetch_marks(&self, token: &SessionToken) -> Result<Marks, PortalDataSourceError>;

    /// Fetch enrolled courses.
    async fn fetch_courses(&self, token: &SessionToken) -> Result<Courses, PortalDataSourceError>;

    /// Fetch the timetable.
    async fn fetch_timetable(&self, token: &SessionToken)
    -> Result<Timetable, PortalDataSourceError>;
}

/// Fixture data source returning canned payloads for any token.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePortalDataSource;

#[async_trait]
impl PortalDataSource for FixturePortalDataSource {
    async fn fetch_profile(&self, _token: &SessionToken) -> Result<UserProfile, PortalDataSourceError> {
        Ok(UserProfile::new(json!({
            "name": "Ada Lovelace",
            "regNumber": "RA0000000000001",
            "program": "B.Tech",
            "semester": 5,
        }))
        .with_registration_number("RA0000000000001"))
    }

    async fn fetch_attendance(
        &self,
        _token: &SessionToken,
    ) -> Result<Attendance, PortalDataSourceError> {
        Ok(Attendance::new(json!([
            { "courseCode": "MA1001", "conducted": 40, "absent": 2 },
            { "courseCode": "CS1002", "conducted": 36, "absent": 5 },
        ])))
    }

    async fn fetch_marks(&self, _token: &SessionToken) -> Result<Marks, PortalDataSourceError> {
        Ok(Marks::new(json!([
            { "courseCode": "MA1001", "tests": [{ "name": "CT1", "scored": 18, "total": 20 }] },
        ])))
    }

    async fn fetch_courses(&self, _token: &SessionToken) -> Result<Courses, PortalDataSourceError> {
        Ok(Courses::new(json!([
            { "code": "MA1001", "title": "Calculus", "credits": 4 },
            { "code": "CS1002", "title": "Programming", "credits": 3 },
        ])))
    }

    async fn fetch_timetable(
        &self,
        _token: &SessionToken,
    ) -> Result<Timetable, PortalDataSourceError> {
        Ok(Timetable::new(json!({
            "monday": [{ "slot": 1, "courseCode": "MA1001" }],
            "tuesday": [{ "slot": 2, "courseCode": "CS1002" }],
        })))
    }
}
