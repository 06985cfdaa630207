use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ProfileSnapshot, RepositorySnapshot};
use crate::{Error, Result};

/// A repository counts as active if updated within this many days
pub const ACTIVE_WINDOW_DAYS: i64 = 90;

/// A repository with more stars than this is "popular"
pub const POPULAR_REPO_STARS: u64 = 1000;

/// How far `created_at` may run ahead of the evaluation time before the
/// snapshot is rejected. Covers clock drift between us and the API.
pub const CLOCK_SKEW_TOLERANCE_SECS: i64 = 300;

/// Aggregates computed once per evaluation and shared by the classifier
/// and the scorer.
///
/// Both time-dependent values (`account_age_years`, `active_repo_count`)
/// are measured against the same `evaluated_at` instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DerivedSignals {
    pub followers: u64,
    pub public_repo_count: u64,
    /// Number of repositories actually supplied, may differ from `public_repo_count`
    pub repo_count: usize,
    pub total_stars: u64,
    pub total_watchers: u64,
    /// Forks / repositories, 0.0 when there are none
    pub fork_ratio: f64,
    pub has_popular_repo: bool,
    pub account_age_years: u32,
    pub active_repo_count: u64,
    pub primary_language: Option<String>,
    /// Lowercased bio, empty when the profile has none
    pub bio_lowercase: String,
    pub evaluated_at: DateTime<Utc>,
}

impl DerivedSignals {
    /// Derive signals, rejecting snapshots that cannot be real
    ///
    /// Counts are unsigned so the only thing left to check is time: an
    /// account cannot be created after the moment we evaluate it, give or
    /// take a few minutes of clock skew.
    pub fn derive(
        profile: &ProfileSnapshot,
        repos: &[RepositorySnapshot],
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if profile.created_at > now + Duration::seconds(CLOCK_SKEW_TOLERANCE_SECS) {
            return Err(Error::InvalidInput(format!(
                "account {} created at {} which is after the evaluation time {}",
                profile.login, profile.created_at, now
            )));
        }

        let total_stars = repos
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.star_count));
        let total_watchers = repos
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.watcher_count));

        let fork_ratio = if repos.is_empty() {
            0.0
        } else {
            repos.iter().filter(|r| r.is_fork).count() as f64 / repos.len() as f64
        };

        let window = Duration::days(ACTIVE_WINDOW_DAYS);
        let active_repo_count = repos
            .iter()
            .filter(|r| now.signed_duration_since(r.updated_at) <= window)
            .count() as u64;

        let signals = Self {
            followers: profile.followers,
            public_repo_count: profile.public_repo_count,
            repo_count: repos.len(),
            total_stars,
            total_watchers,
            fork_ratio,
            has_popular_repo: repos.iter().any(|r| r.star_count > POPULAR_REPO_STARS),
            account_age_years: (now.year() - profile.created_at.year()).max(0) as u32,
            active_repo_count,
            primary_language: primary_language(repos),
            bio_lowercase: profile
                .bio
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_default(),
            evaluated_at: now,
        };

        debug!(
            login = %profile.login,
            stars = signals.total_stars,
            active = signals.active_repo_count,
            fork_ratio = signals.fork_ratio,
            "derived signals"
        );

        Ok(signals)
    }
}

/// Most frequent non-empty language; ties go to whichever showed up first
pub fn primary_language(repos: &[RepositorySnapshot]) -> Option<String> {
    let mut tally: Vec<(&str, usize)> = Vec::new();

    for lang in repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        match tally.iter_mut().find(|(seen, _)| *seen == lang) {
            Some((_, count)) => *count += 1,
            None => tally.push((lang, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (lang, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((lang, count));
        }
    }

    best.map(|(lang, _)| lang.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn now() -> DateTime<Utc> {
        at("2025-06-15T12:00:00Z")
    }

    #[test]
    fn test_empty_repositories() {
        let profile = ProfileSnapshot::new("empty", at("2020-03-01T00:00:00Z")).followers(7);
        let signals = DerivedSignals::derive(&profile, &[], now()).unwrap();

        assert_eq!(signals.total_stars, 0);
        assert_eq!(signals.total_watchers, 0);
        assert_eq!(signals.fork_ratio, 0.0);
        assert!(!signals.has_popular_repo);
        assert_eq!(signals.active_repo_count, 0);
        assert_eq!(signals.primary_language, None);
        assert_eq!(signals.account_age_years, 5);
        assert_eq!(signals.bio_lowercase, "");
    }

    #[test]
    fn test_aggregates() {
        let profile = ProfileSnapshot::new("agg", at("2024-12-31T23:59:59Z")).bio("Open SOURCE fan");
        let repos = vec![
            RepositorySnapshot::new("a", now() - Duration::days(10)).stars(1001).watchers(5),
            RepositorySnapshot::new("b", now() - Duration::days(90)).stars(4).fork(),
            RepositorySnapshot::new("c", now() - Duration::days(91)).watchers(3).fork(),
            RepositorySnapshot::new("d", now() - Duration::days(400)).fork(),
        ];

        let signals = DerivedSignals::derive(&profile, &repos, now()).unwrap();
        assert_eq!(signals.total_stars, 1005);
        assert_eq!(signals.total_watchers, 8);
        assert_eq!(signals.fork_ratio, 0.75);
        assert!(signals.has_popular_repo);
        // 90 days is still inside the window, 91 is not
        assert_eq!(signals.active_repo_count, 2);
        // Calendar years, not elapsed time
        assert_eq!(signals.account_age_years, 1);
        assert_eq!(signals.bio_lowercase, "open source fan");
        assert_eq!(signals.evaluated_at, now());
    }

    #[test]
    fn test_popular_repo_is_strictly_above_threshold() {
        let profile = ProfileSnapshot::new("p", at("2020-01-01T00:00:00Z"));
        let repos = vec![RepositorySnapshot::new("a", now()).stars(1000)];
        let signals = DerivedSignals::derive(&profile, &repos, now()).unwrap();
        assert!(!signals.has_popular_repo);
    }

    #[test]
    fn test_primary_language_tie_goes_to_first_seen() {
        let t = now();
        let repos = vec![
            RepositorySnapshot::new("1", t).language("Go"),
            RepositorySnapshot::new("2", t),
            RepositorySnapshot::new("3", t).language("Rust"),
            RepositorySnapshot::new("4", t).language(""),
            RepositorySnapshot::new("5", t).language("Rust"),
            RepositorySnapshot::new("6", t).language("Go"),
        ];
        assert_eq!(primary_language(&repos).as_deref(), Some("Go"));
    }

    #[test]
    fn test_primary_language_majority_wins() {
        let t = now();
        let repos = vec![
            RepositorySnapshot::new("1", t).language("Go"),
            RepositorySnapshot::new("2", t).language("Rust"),
            RepositorySnapshot::new("3", t).language("Rust"),
        ];
        assert_eq!(primary_language(&repos).as_deref(), Some("Rust"));
    }

    #[test]
    fn test_primary_language_ignores_blank() {
        let t = now();
        let repos = vec![
            RepositorySnapshot::new("1", t).language("  "),
            RepositorySnapshot::new("2", t),
        ];
        assert_eq!(primary_language(&repos), None);
    }

    #[test]
    fn test_future_account_is_invalid() {
        let profile = ProfileSnapshot::new("time-traveller", now() + Duration::days(1));
        let err = DerivedSignals::derive(&profile, &[], now()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_small_clock_skew_is_tolerated() {
        let profile = ProfileSnapshot::new("just-joined", now() + Duration::seconds(1));
        let signals = DerivedSignals::derive(&profile, &[], now()).unwrap();
        assert_eq!(signals.account_age_years, 0);

        let edge = ProfileSnapshot::new("edge", now() + Duration::seconds(CLOCK_SKEW_TOLERANCE_SECS));
        assert!(DerivedSignals::derive(&edge, &[], now()).is_ok());

        let past_edge =
            ProfileSnapshot::new("edge", now() + Duration::seconds(CLOCK_SKEW_TOLERANCE_SECS + 1));
        assert!(DerivedSignals::derive(&past_edge, &[], now()).is_err());
    }

    #[test]
    fn test_huge_star_counts_saturate() {
        let profile = ProfileSnapshot::new("big", at("2020-01-01T00:00:00Z"));
        let repos = vec![
            RepositorySnapshot::new("a", now()).stars(u64::MAX),
            RepositorySnapshot::new("b", now()).stars(10),
        ];
        let signals = DerivedSignals::derive(&profile, &repos, now()).unwrap();
        assert_eq!(signals.total_stars, u64::MAX);
    }
}
