// Provider implementations for the profile sources we support
pub mod github;

pub use github::GitHubSource;
