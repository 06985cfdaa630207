use chrono::{DateTime, Utc};

use crate::activity::ActivitySummary;
use crate::models::{ProfileSnapshot, RepositorySnapshot};
use crate::Result;

/// Where profile data comes from - makes testing easier and keeps the
/// engine free of HTTP details.
///
/// Transport, auth and rate-limit failures are passed through untouched;
/// the engine does not try to interpret them.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, login: &str) -> Result<ProfileSnapshot>;
    async fn fetch_repositories(&self, login: &str) -> Result<Vec<RepositorySnapshot>>;
    async fn fetch_activity(&self, login: &str, now: DateTime<Utc>) -> Result<ActivitySummary>;
}
