//! Aggregation engine behind `GET /api/user`.
//!
//! One task per category is spawned before anything is awaited. Tasks report
//! `(category, outcome)` pairs over a bounded channel sized to the category
//! count, so no reporter can block. The single consumer:
//!
//! - keeps the first error it observes and cancels the remaining fetches;
//! - drains every report regardless, discarding payloads once failed;
//! - merges payloads by key and only builds a record when all five arrived.
//!
//! Which error wins depends on arrival order and is not deterministic when
//! several categories fail together.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::ports::{PortalDataSource, PortalDataSourceError, UserRecordQuery};
use crate::domain::{
    Category, CategoryPayload, Error, SessionToken, TraceId, UserRecord, UserRecordBuildError,
    UserRecordBuilder,
};

type Report = (Category, Result<CategoryPayload, PortalDataSourceError>);

/// Tunables for one aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationPolicy {
    fetch_timeout: Option<Duration>,
}

impl AggregationPolicy {
    /// Bound every individual fetch; `None` waits indefinitely.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout.filter(|limit| !limit.is_zero());
        self
    }

    /// Per-fetch time limit, if any.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout
    }
}

/// Failures returned by [`UserRecordService::aggregate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    /// The first category fetch observed to fail.
    #[error("failed to fetch {category}: {source}")]
    Fetch {
        category: Category,
        #[source]
        source: PortalDataSourceError,
    },
    /// A fetch task ended without reporting, typically because it panicked.
    #[error("a fetch task ended without reporting ({received} of {expected} reports)")]
    Lost { received: usize, expected: usize },
    /// Reports could not be merged into a record.
    #[error(transparent)]
    Merge(#[from] UserRecordBuildError),
}

/// Fan-out/fan-in service producing [`UserRecord`]s.
pub struct UserRecordService<S: ?Sized> {
    source: Arc<S>,
    policy: AggregationPolicy,
}

impl<S: ?Sized> Clone for UserRecordService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            policy: self.policy,
        }
    }
}

impl<S: ?Sized> UserRecordService<S> {
    /// Create a service with the default policy (no per-fetch timeout).
    pub fn new(source: Arc<S>) -> Self {
        Self::with_policy(source, AggregationPolicy::default())
    }

    /// Create a service with an explicit policy.
    pub fn with_policy(source: Arc<S>, policy: AggregationPolicy) -> Self {
        Self { source, policy }
    }
}

impl<S> UserRecordService<S>
where
    S: PortalDataSource + ?Sized + 'static,
{
    /// Fetch every category concurrently and merge them into one record.
    ///
    /// Returns the first observed failure and no record when any fetch fails.
    /// Dropping the returned future cancels outstanding fetches.
    pub async fn aggregate(&self, token: &SessionToken) -> Result<UserRecord, AggregationError> {
        let expected = Category::ALL.len();
        let (tx, mut rx) = mpsc::channel::<Report>(expected);
        let cancel = CancellationToken::new();
        let _cancel_on_exit = cancel.clone().drop_guard();

        for category in Category::ALL {
            let tx = tx.clone();
            let source = Arc::clone(&self.source);
            let token = token.clone();
            let cancel = cancel.clone();
            let timeout = self.policy.fetch_timeout;
            tokio::spawn(TraceId::propagate(async move {
                let outcome = tokio::select! {
                    biased;
                    () = cancel.cancelled() => Err(PortalDataSourceError::cancelled()),
                    outcome = fetch_category(source.as_ref(), category, &token, timeout) => outcome,
                };
                // Send only fails once the consumer is gone, and then nobody wants the report.
                let _ = tx.send((category, outcome)).await;
            }));
        }
        drop(tx);

        let mut builder = UserRecordBuilder::default();
        let mut failure: Option<AggregationError> = None;
        let mut received = 0_usize;
        while let Some((category, outcome)) = rx.recv().await {
            received += 1;
            if failure.is_some() {
                continue;
            }
            let merged = outcome
                .map_err(|source| AggregationError::Fetch { category, source })
                .and_then(|payload| builder.insert(payload).map_err(AggregationError::from));
            if let Err(error) = merged {
                cancel.cancel();
                failure = Some(error);
            }
        }

        if let Some(error) = failure {
            return Err(error);
        }
        if received < expected {
            return Err(AggregationError::Lost { received, expected });
        }
        builder.build().map_err(AggregationError::from)
    }
}

async fn fetch_category<S>(
    source: &S,
    category: Category,
    token: &SessionToken,
    timeout: Option<Duration>,
) -> Result<CategoryPayload, PortalDataSourceError>
where
    S: PortalDataSource + ?Sized,
{
    let fetch = async {
        match category {
            Category::Profile => source.fetch_profile(token).await.map(CategoryPayload::Profile),
            Category::Attendance => source
                .fetch_attendance(token)
                .await
                .map(CategoryPayload::Attendance),
            Category::Marks => source.fetch_marks(token).await.map(CategoryPayload::Marks),
            Category::Courses => source.fetch_courses(token).await.map(CategoryPayload::Courses),
            Category::Timetable => source
                .fetch_timetable(token)
                .await
                .map(CategoryPayload::Timetable),
        }
    };

    match timeout {
        Some(limit) => tokio::time::timeout(limit, fetch).await.map_err(|_| {
            PortalDataSourceError::timeout(format!(
                "{category} exceeded {}ms",
                limit.as_millis()
            ))
        })?,
        None => fetch.await,
    }
}

fn map_aggregation_error(error: AggregationError) -> Error {
    match &error {
        AggregationError::Fetch { .. } => Error::upstream(error.to_string()),
        AggregationError::Lost { .. } | AggregationError::Merge(_) => {
            Error::internal(error.to_string())
        }
    }
}

#[async_trait]
impl<S> UserRecordQuery for UserRecordService<S>
where
    S: PortalDataSource + ?Sized + 'static,
{
    async fn fetch_all(&self, token: &SessionToken) -> Result<UserRecord, Error> {
        self.aggregate(token).await.map_err(map_aggregation_error)
    }
}

#[cfg(test)]
#[path = "user_record_service_tests.rs"]
mod tests;
