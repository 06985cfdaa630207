// Ties signals, classifier and scorer together into one report
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::activity::ActivitySummary;
use crate::classifier::{AuraCategory, Classifier};
use crate::models::{ProfileSnapshot, RepositorySnapshot};
use crate::scorer::{ScoreBreakdown, Scorer};
use crate::signals::DerivedSignals;
use crate::source::ProfileSource;
use crate::Result;

/// Everything we know about a profile's aura
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuraReport {
    pub login: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub category: AuraCategory,
    pub points: u32,
    pub breakdown: ScoreBreakdown,
    pub signals: DerivedSignals,
    /// Only present when events were fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivitySummary>,
}

/// Stateless entry point. `now` is always passed in, never read from a clock.
pub struct AuraEngine;

impl AuraEngine {
    /// Classify and score one snapshot
    pub fn evaluate(
        profile: &ProfileSnapshot,
        repos: &[RepositorySnapshot],
        now: DateTime<Utc>,
    ) -> Result<AuraReport> {
        let signals = DerivedSignals::derive(profile, repos, now)?;
        let category = Classifier::classify(&signals);
        let breakdown = Scorer::breakdown(&signals);

        Ok(AuraReport {
            login: profile.login.clone(),
            display_name: profile.display_name().to_string(),
            avatar_url: profile.avatar_url.clone(),
            category,
            points: breakdown.total,
            breakdown,
            signals,
            activity: None,
        })
    }

    pub fn classify(
        profile: &ProfileSnapshot,
        repos: &[RepositorySnapshot],
        now: DateTime<Utc>,
    ) -> Result<AuraCategory> {
        let signals = DerivedSignals::derive(profile, repos, now)?;
        Ok(Classifier::classify(&signals))
    }

    pub fn score(
        profile: &ProfileSnapshot,
        repos: &[RepositorySnapshot],
        now: DateTime<Utc>,
    ) -> Result<u32> {
        let signals = DerivedSignals::derive(profile, repos, now)?;
        Ok(Scorer::score(&signals))
    }

    /// Fetch a profile from `source` and evaluate it
    ///
    /// Profile, repositories and (optionally) events are fetched
    /// concurrently. Activity is decoration, so a failed events request is
    /// logged and dropped instead of failing the whole analysis.
    pub async fn analyze(
        source: &dyn ProfileSource,
        login: &str,
        now: DateTime<Utc>,
        with_activity: bool,
    ) -> Result<AuraReport> {
        let activity = async {
            if with_activity {
                Some(source.fetch_activity(login, now).await)
            } else {
                None
            }
        };

        let (profile, repos, activity) = futures::join!(
            source.fetch_profile(login),
            source.fetch_repositories(login),
            activity
        );

        let profile = profile?;
        let repos = repos?;

        let mut report = Self::evaluate(&profile, &repos, now)?;
        report.activity = match activity {
            Some(Ok(summary)) => Some(summary),
            Some(Err(e)) => {
                warn!("Skipping activity for {}: {}", login, e);
                None
            }
            None => None,
        };

        info!(
            login = %report.login,
            aura = %report.category.label,
            points = report.points,
            "aura evaluated"
        );

        Ok(report)
    }
}
