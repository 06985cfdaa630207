// GitHub REST client - the only place that talks to the network
pub mod github;
pub mod retry;

// Re-export common types
pub use github::{GitHubClient, GitHubError, GitHubEvent, GitHubRepo, GitHubUser, GITHUB_API_BASE};
pub use retry::RetryConfig;
