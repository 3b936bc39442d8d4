//! Driving port for reading the aggregated user record.

use async_trait::async_trait;

use crate::domain::{Error, SessionToken, UserRecord};

/// Domain use-case port returning every data category for one session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRecordQuery: Send + Sync {
    /// Fetch and merge all categories, or fail without a partial record.
    async fn fetch_all(&self, token: &SessionToken) -> Result<UserRecord, Error>;
}
