use aura_api::{GitHubRepo, GitHubUser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile data an aura is computed from - one per evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileSnapshot {
    pub login: String,
    pub followers: u64,
    pub public_repo_count: u64,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Display only
    pub name: Option<String>,
    /// Display only
    pub avatar_url: Option<String>,
}

impl ProfileSnapshot {
    pub fn new(login: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            login: login.into(),
            followers: 0,
            public_repo_count: 0,
            bio: None,
            created_at,
            name: None,
            avatar_url: None,
        }
    }

    pub fn followers(mut self, followers: u64) -> Self {
        self.followers = followers;
        self
    }

    pub fn public_repos(mut self, count: u64) -> Self {
        self.public_repo_count = count;
        self
    }

    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Name shown in reports, falls back to the login
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// One repository of the profile, in the order the source returned them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositorySnapshot {
    pub name: String,
    pub star_count: u64,
    pub watcher_count: u64,
    pub is_fork: bool,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl RepositorySnapshot {
    pub fn new(name: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            star_count: 0,
            watcher_count: 0,
            is_fork: false,
            language: None,
            updated_at,
        }
    }

    pub fn stars(mut self, stars: u64) -> Self {
        self.star_count = stars;
        self
    }

    pub fn watchers(mut self, watchers: u64) -> Self {
        self.watcher_count = watchers;
        self
    }

    pub fn fork(mut self) -> Self {
        self.is_fork = true;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl From<GitHubUser> for ProfileSnapshot {
    fn from(user: GitHubUser) -> Self {
        Self {
            login: user.login,
            followers: user.followers,
            public_repo_count: user.public_repos,
            bio: user.bio,
            created_at: user.created_at,
            name: user.name,
            avatar_url: user.avatar_url,
        }
    }
}

impl From<GitHubRepo> for RepositorySnapshot {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            name: repo.name,
            star_count: repo.stargazers_count,
            watcher_count: repo.watchers_count,
            is_fork: repo.fork,
            language: repo.language,
            updated_at: repo.updated_at,
        }
    }
}

/// Offline input: the raw API records saved to a JSON file
///
/// Uses GitHub's field names so `curl` output can be pasted in directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub profile: GitHubUser,
    #[serde(default)]
    pub repositories: Vec<GitHubRepo>,
}

impl SnapshotFile {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::Error::InvalidInput(format!("malformed snapshot: {}", e)))
    }

    pub fn into_snapshots(self) -> (ProfileSnapshot, Vec<RepositorySnapshot>) {
        let profile = ProfileSnapshot::from(self.profile);
        let repos = self
            .repositories
            .into_iter()
            .map(RepositorySnapshot::from)
            .collect();
        (profile, repos)
    }
}
