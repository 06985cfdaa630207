// Recent contribution activity, approximated from public events.
// Shown next to the aura but never fed into classification or scoring.
use aura_api::GitHubEvent;
use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Event types that count as a contribution
pub const CONTRIBUTION_EVENTS: &[&str] = &["PushEvent", "PullRequestEvent"];

/// `recent` only looks at the newest events, the size of GitHub's default page
pub const RECENT_EVENT_WINDOW: usize = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ActivitySummary {
    /// Contributions among the newest `RECENT_EVENT_WINDOW` events
    pub recent: u64,
    /// Contributions within a year of the evaluation time
    pub last_year: u64,
}

impl ActivitySummary {
    /// `events` are expected newest first, as the events API returns them
    pub fn from_events(events: &[GitHubEvent], now: DateTime<Utc>) -> Self {
        let one_year_ago = now.checked_sub_months(Months::new(12)).unwrap_or(now);

        let mut summary = Self::default();
        for (i, event) in events.iter().enumerate() {
            if !CONTRIBUTION_EVENTS.contains(&event.event_type.as_str()) {
                continue;
            }
            if i < RECENT_EVENT_WINDOW {
                summary.recent += 1;
            }
            if event.created_at >= one_year_ago {
                summary.last_year += 1;
            }
        }
        summary
    }
}
