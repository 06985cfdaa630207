use serde::{Deserialize, Serialize};

use crate::signals::DerivedSignals;

/// Upper bound of the aura point scale. Scores live in `0..=1000`.
pub const MAX_AURA_POINTS: u32 = 1000;

/// Flat bonuses that stack on top of the capped terms
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// More than 50k followers
    MassFollowing,
    /// More than 25k stars across repositories
    StarCollector,
    /// More than 300 public repositories
    Prolific,
    /// More than 20 repositories updated in the active window
    Hyperactive,
    /// More than 5k watchers across repositories
    WidelyWatched,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::MassFollowing,
        Achievement::StarCollector,
        Achievement::Prolific,
        Achievement::Hyperactive,
        Achievement::WidelyWatched,
    ];

    pub fn points(&self) -> u32 {
        match self {
            Achievement::MassFollowing | Achievement::StarCollector => 100,
            Achievement::Prolific | Achievement::Hyperactive | Achievement::WidelyWatched => 50,
        }
    }

    pub fn earned(&self, signals: &DerivedSignals) -> bool {
        match self {
            Achievement::MassFollowing => signals.followers > 50_000,
            Achievement::StarCollector => signals.total_stars > 25_000,
            Achievement::Prolific => signals.public_repo_count > 300,
            Achievement::Hyperactive => signals.active_repo_count > 20,
            Achievement::WidelyWatched => signals.total_watchers > 5_000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Achievement::MassFollowing => "Mass following",
            Achievement::StarCollector => "Star collector",
            Achievement::Prolific => "Prolific",
            Achievement::Hyperactive => "Hyperactive",
            Achievement::WidelyWatched => "Widely watched",
        }
    }
}

/// Per-term breakdown of an aura score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ScoreBreakdown {
    /// Followers (0-400)
    pub follower_points: f64,
    /// Stars (0-300)
    pub star_points: f64,
    /// Public repositories (0-100)
    pub repo_points: f64,
    /// Watchers (0-50)
    pub watcher_points: f64,
    /// Recently updated repositories (0-50)
    pub active_repo_bonus: f64,
    /// Account age (0-50)
    pub account_age_bonus: f64,
    pub achievements: Vec<Achievement>,
    /// Final rounded and clamped score
    pub total: u32,
}

impl ScoreBreakdown {
    pub fn achievement_points(&self) -> u32 {
        self.achievements.iter().map(Achievement::points).sum()
    }

    fn raw_sum(&self) -> f64 {
        self.follower_points
            + self.star_points
            + self.repo_points
            + self.watcher_points
            + self.active_repo_bonus
            + self.account_age_bonus
            + f64::from(self.achievement_points())
    }
}

/// Turns derived signals into bounded aura points
///
/// Every term is capped on its own before summing so that one extreme
/// signal cannot carry the whole score.
pub struct Scorer;

impl Scorer {
    pub fn score(signals: &DerivedSignals) -> u32 {
        Self::breakdown(signals).total
    }

    pub fn breakdown(signals: &DerivedSignals) -> ScoreBreakdown {
        // Nothing published at all, nothing to score
        if signals.public_repo_count == 0 && signals.repo_count == 0 {
            return ScoreBreakdown::default();
        }

        let mut breakdown = ScoreBreakdown {
            follower_points: Self::follower_points(signals.followers),
            star_points: Self::star_points(signals.total_stars),
            repo_points: Self::repo_points(signals.public_repo_count),
            watcher_points: Self::watcher_points(signals.total_watchers),
            active_repo_bonus: Self::active_repo_bonus(signals.active_repo_count),
            account_age_bonus: Self::account_age_bonus(signals.account_age_years),
            achievements: Achievement::ALL
                .into_iter()
                .filter(|a| a.earned(signals))
                .collect(),
            total: 0,
        };

        breakdown.total = breakdown.raw_sum().round().clamp(0.0, f64::from(MAX_AURA_POINTS)) as u32;
        breakdown
    }

    fn follower_points(followers: u64) -> f64 {
        (followers.min(100_000) as f64 / 250.0).min(400.0)
    }

    fn star_points(stars: u64) -> f64 {
        (stars.min(50_000) as f64 / 167.0).min(300.0)
    }

    fn repo_points(public_repos: u64) -> f64 {
        (public_repos.min(500) as f64 * 0.2).min(100.0)
    }

    fn watcher_points(watchers: u64) -> f64 {
        (watchers.min(10_000) as f64 / 200.0).min(50.0)
    }

    fn active_repo_bonus(active: u64) -> f64 {
        active.saturating_mul(2).min(50) as f64
    }

    fn account_age_bonus(years: u32) -> f64 {
        f64::from(years.saturating_mul(5).min(50))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProfileSnapshot, RepositorySnapshot};
    use chrono::{DateTime, Duration, Utc};

    fn now() -> DateTime<Utc> {
        "2025-06-15T12:00:00Z".parse().unwrap()
    }

    #[derive(Clone, Copy, Default)]
    struct Inputs {
        followers: u64,
        stars: u64,
        public_repos: u64,
        watchers: u64,
        active: u64,
        age_years: i64,
    }

    fn signals(i: Inputs) -> DerivedSignals {
        let created = now() - Duration::days(366 * i.age_years);
        let profile = ProfileSnapshot::new("scorer", created)
            .followers(i.followers)
            .public_repos(i.public_repos);

        let mut repos = vec![RepositorySnapshot::new("main", now() - Duration::days(400))
            .stars(i.stars)
            .watchers(i.watchers)];
        repos.extend(
            (0..i.active).map(|n| RepositorySnapshot::new(format!("a{}", n), now() - Duration::days(1))),
        );

        DerivedSignals::derive(&profile, &repos, now()).unwrap()
    }

    fn score(i: Inputs) -> u32 {
        Scorer::score(&signals(i))
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let profile = ProfileSnapshot::new("nobody", "2010-01-01T00:00:00Z".parse().unwrap());
        let s = DerivedSignals::derive(&profile, &[], now()).unwrap();
        assert_eq!(Scorer::score(&s), 0);
        assert_eq!(Scorer::breakdown(&s), ScoreBreakdown::default());
    }

    #[test]
    fn test_terms_add_up() {
        let breakdown = Scorer::breakdown(&signals(Inputs {
            followers: 1_000,  // 4
            stars: 1_670,      // 10
            public_repos: 50,  // 10
            watchers: 400,     // 2
            active: 5,         // 10
            age_years: 3,      // 15
        }));

        assert_eq!(breakdown.follower_points, 4.0);
        assert_eq!(breakdown.star_points, 10.0);
        assert_eq!(breakdown.repo_points, 10.0);
        assert_eq!(breakdown.watcher_points, 2.0);
        assert_eq!(breakdown.active_repo_bonus, 10.0);
        assert_eq!(breakdown.account_age_bonus, 15.0);
        assert!(breakdown.achievements.is_empty());
        assert_eq!(breakdown.total, 51);
    }

    #[test]
    fn test_terms_are_capped() {
        let breakdown = Scorer::breakdown(&signals(Inputs {
            followers: 10_000_000,
            stars: 9_000_000,
            public_repos: 4_000,
            watchers: 1_000_000,
            active: 40,
            age_years: 30,
        }));

        assert_eq!(breakdown.follower_points, 400.0);
        assert!(breakdown.star_points <= 300.0 && breakdown.star_points > 299.0);
        assert_eq!(breakdown.repo_points, 100.0);
        assert_eq!(breakdown.watcher_points, 50.0);
        assert_eq!(breakdown.active_repo_bonus, 50.0);
        assert_eq!(breakdown.account_age_bonus, 50.0);
        assert_eq!(breakdown.achievements.len(), 5);
        assert_eq!(breakdown.achievement_points(), 350);
        assert_eq!(breakdown.total, MAX_AURA_POINTS);
    }

    #[test]
    fn test_achievements_trigger_strictly_above_threshold() {
        let at = Scorer::breakdown(&signals(Inputs {
            followers: 50_000,
            public_repos: 1,
            ..Inputs::default()
        }));
        assert!(at.achievements.is_empty());

        let above = Scorer::breakdown(&signals(Inputs {
            followers: 50_001,
            public_repos: 1,
            ..Inputs::default()
        }));
        assert_eq!(above.achievements, vec![Achievement::MassFollowing]);
        assert_eq!(above.total, 200 + 100);
    }

    #[test]
    fn test_monotonic_in_each_input() {
        let base = Inputs {
            followers: 40,
            stars: 10,
            public_repos: 3,
            watchers: 2,
            active: 1,
            age_years: 1,
        };
        let ladder: [u64; 9] = [0, 1, 99, 250, 5_001, 25_001, 50_001, 100_000, 2_000_000];

        let variants: [fn(Inputs, u64) -> Inputs; 4] = [
            |i, v| Inputs { followers: v, ..i },
            |i, v| Inputs { stars: v, ..i },
            |i, v| Inputs { public_repos: v, ..i },
            |i, v| Inputs { watchers: v, ..i },
        ];

        for vary in variants {
            let scores: Vec<u32> = ladder.iter().map(|&v| score(vary(base, v))).collect();
            assert!(scores.windows(2).all(|w| w[0] <= w[1]), "not monotonic: {:?}", scores);
        }

        let by_active: Vec<u32> = [0, 1, 10, 21, 30]
            .iter()
            .map(|&active| score(Inputs { active, ..base }))
            .collect();
        assert!(by_active.windows(2).all(|w| w[0] <= w[1]), "{:?}", by_active);

        let by_age: Vec<u32> = [0, 1, 5, 10, 20]
            .iter()
            .map(|&age_years| score(Inputs { age_years, ..base }))
            .collect();
        assert!(by_age.windows(2).all(|w| w[0] <= w[1]), "{:?}", by_age);
    }

    #[test]
    fn test_score_is_bounded_for_extremes() {
        let extreme = Inputs {
            followers: u64::MAX,
            stars: u64::MAX,
            public_repos: u64::MAX,
            watchers: u64::MAX,
            active: 60,
            age_years: 50,
        };
        assert!(score(extreme) <= MAX_AURA_POINTS);
        assert_eq!(score(Inputs { followers: 10_000_000, public_repos: 1, ..Inputs::default() }), 500);
    }
}
