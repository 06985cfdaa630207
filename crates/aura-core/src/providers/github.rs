// GitHub provider - bridges the API client with the ProfileSource trait
use async_trait::async_trait;
use aura_api::{GitHubClient, RetryConfig};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    activity::ActivitySummary,
    models::{ProfileSnapshot, RepositorySnapshot},
    source::ProfileSource,
    Result,
};

/// Wrapper around GitHubClient that implements ProfileSource
pub struct GitHubSource {
    client: GitHubClient,
}

impl GitHubSource {
    pub fn with_settings(token: Option<String>, api_url: &str, retry: RetryConfig) -> Result<Self> {
        let client = GitHubClient::with_base_url(token, api_url.to_string())?.with_retry_config(retry);
        Ok(Self { client })
    }
}

#[async_trait]
impl ProfileSource for GitHubSource {
    async fn fetch_profile(&self, login: &str) -> Result<ProfileSnapshot> {
        info!("Fetching GitHub profile for {}", login);
        let user = self.client.get_user(login).await?;
        Ok(ProfileSnapshot::from(user))
    }

    async fn fetch_repositories(&self, login: &str) -> Result<Vec<RepositorySnapshot>> {
        let repos = self.client.get_repositories(login).await?;
        info!("Fetched {} repositories for {}", repos.len(), login);
        Ok(repos.into_iter().map(RepositorySnapshot::from).collect())
    }

    async fn fetch_activity(&self, login: &str, now: DateTime<Utc>) -> Result<ActivitySummary> {
        let events = self.client.get_events(login).await?;
        Ok(ActivitySummary::from_events(&events, now))
    }
}
