use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::retry::{is_retryable_status, with_retry, RetryConfig, Retryable};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const REPOS_PER_PAGE: u32 = 100;
const EVENTS_PER_PAGE: u32 = 100;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Rate limit exceeded{}", reset_hint(.reset_at))]
    RateLimitExceeded { reset_at: Option<DateTime<Utc>> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid GitHub token or insufficient permissions")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn reset_hint(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => format!(", try again after {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => String::new(),
    }
}

impl Retryable for GitHubError {
    fn is_retryable(&self) -> bool {
        match self {
            GitHubError::RequestFailed { status, .. } => StatusCode::from_u16(*status)
                .map(is_retryable_status)
                .unwrap_or(false),
            GitHubError::NetworkError(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Client for the handful of public GitHub REST endpoints an aura needs
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
    retry_config: RetryConfig,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(token, GITHUB_API_BASE.to_string())
    }

    /// For GitHub Enterprise or a local mock server
    pub fn with_base_url(token: Option<String>, base_url: String) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("GitAura/0.1.0"));
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_config: RetryConfig::default(),
        })
    }

    /// Replace the default retry policy
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// `GET /users/{login}`
    pub async fn get_user(&self, login: &str) -> Result<GitHubUser> {
        let path = format!("/users/{}", urlencoding::encode(login));
        self.get_json(&path, &[], &format!("user {}", login)).await
    }

    /// `GET /users/{login}/repos`, most recently updated first
    pub async fn get_repositories(&self, login: &str) -> Result<Vec<GitHubRepo>> {
        let path = format!("/users/{}/repos", urlencoding::encode(login));
        let per_page = REPOS_PER_PAGE.to_string();
        self.get_json(
            &path,
            &[("per_page", per_page.as_str()), ("sort", "updated")],
            &format!("repositories of {}", login),
        )
        .await
    }

    /// `GET /users/{login}/events`, the most recent public events
    pub async fn get_events(&self, login: &str) -> Result<Vec<GitHubEvent>> {
        let path = format!("/users/{}/events", urlencoding::encode(login));
        let per_page = EVENTS_PER_PAGE.to_string();
        self.get_json(
            &path,
            &[("per_page", per_page.as_str())],
            &format!("events of {}", login),
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        with_retry(&self.retry_config, || async {
            let mut request = self.client.get(&url).query(query);

            if let Some(ref token) = self.token {
                request = request.header(AUTHORIZATION, format!("token {}", token));
            }

            let response = request.send().await?;
            let status = response.status();

            if !status.is_success() {
                let headers = response.headers().clone();
                let body = response.text().await.unwrap_or_default();
                return Err(failure_from_response(status, &headers, resource, body));
            }

            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        })
        .await
    }
}

/// Map a non-success response onto our error taxonomy
///
/// GitHub reports an exhausted quota as 403 (or 429) with
/// `X-RateLimit-Remaining: 0`; a plain 403 is something else.
pub fn failure_from_response(
    status: StatusCode,
    headers: &HeaderMap,
    resource: &str,
    body: String,
) -> GitHubError {
    if status == StatusCode::NOT_FOUND {
        return GitHubError::NotFound(resource.to_string());
    }

    if status == StatusCode::UNAUTHORIZED {
        return GitHubError::AuthRequired;
    }

    let quota_exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false);

    if quota_exhausted
        && (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
    {
        let reset_at = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
        return GitHubError::RateLimitExceeded { reset_at };
    }

    GitHubError::RequestFailed {
        status: status.as_u16(),
        body,
    }
}

/// GitHub sends `null` for some counters; treat it like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// User profile from `/users/{login}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_repos: u64,
    pub created_at: DateTime<Utc>,
}

/// Repository entry from `/users/{login}/repos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub watchers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fork: bool,
    #[serde(default)]
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Public event from `/users/{login}/events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubEvent {
    #[serde(rename = "type")]
    pub event_type: String, // "PushEvent", "PullRequestEvent", "WatchEvent", ...
    pub created_at: DateTime<Utc>,
}
