use async_trait::async_trait;
use aura_core::{
    ActivitySummary, AuraEngine, AuraKind, Error, ProfileSnapshot, ProfileSource,
    RepositorySnapshot, SnapshotFile, Tier, MAX_AURA_POINTS,
};
use chrono::{DateTime, Duration, Utc};

mockall::mock! {
    Source {}

    #[async_trait]
    impl ProfileSource for Source {
        async fn fetch_profile(&self, login: &str) -> aura_core::Result<ProfileSnapshot>;
        async fn fetch_repositories(&self, login: &str) -> aura_core::Result<Vec<RepositorySnapshot>>;
        async fn fetch_activity(&self, login: &str, now: DateTime<Utc>) -> aura_core::Result<ActivitySummary>;
    }
}

fn now() -> DateTime<Utc> {
    "2025-06-15T12:00:00Z".parse().unwrap()
}

fn profile(followers: u64, public_repos: u64) -> ProfileSnapshot {
    ProfileSnapshot::new("someone", "2018-09-01T00:00:00Z".parse().unwrap())
        .followers(followers)
        .public_repos(public_repos)
}

fn repos(count: usize, stars_each: u64) -> Vec<RepositorySnapshot> {
    (0..count)
        .map(|i| {
            RepositorySnapshot::new(format!("r{}", i), now() - Duration::days(200))
                .stars(stars_each)
                .watchers(stars_each / 2)
        })
        .collect()
}

#[test]
fn test_classify_always_lands_in_the_closed_set() {
    let followers = [0, 1, 2, 3, 50, 100, 101, 777, 1_500, 4_000, 9_000, 30_000, 75_000, 250_000];
    let star_counts = [0, 10, 600, 3_000, 40_000];
    let repo_counts = [0, 1, 25];

    for &f in &followers {
        for &s in &star_counts {
            for &n in &repo_counts {
                let category = AuraEngine::classify(&profile(f, n as u64 * 5), &repos(n, s), now()).unwrap();
                assert!(AuraKind::ALL.contains(&category.kind));
                assert!(Tier::ALL.contains(&category.tier));
                assert_eq!(category.tier, category.kind.tier());
                assert!(!category.label.is_empty());
            }
        }
    }
}

#[test]
fn test_one_follower_with_huge_stars_is_noob() {
    let category = AuraEngine::classify(&profile(1, 3), &repos(1, 999_999), now()).unwrap();
    assert_eq!(category.kind, AuraKind::Noob);
}

#[test]
fn test_popular_account_without_repositories_is_noob() {
    let category = AuraEngine::classify(&profile(50_000, 0), &[], now()).unwrap();
    assert_eq!(category.kind, AuraKind::Noob);
}

#[test]
fn test_open_source_contributor_bio_overrides_huge_following() {
    let p = profile(200_000, 10).bio("Open Source Contributor");
    let category = AuraEngine::classify(&p, &repos(3, 50_000), now()).unwrap();
    assert_eq!(category.kind, AuraKind::CommunityBuilder);
}

#[test]
fn test_empty_profile_is_noob_with_zero_points() {
    let p = profile(0, 0);
    let report = AuraEngine::evaluate(&p, &[], now()).unwrap();
    assert_eq!(report.category.kind, AuraKind::Noob);
    assert_eq!(report.points, 0);
}

#[test]
fn test_emerging_creator_scenario() {
    let p = profile(120, 25).bio("");
    let rs: Vec<_> = (0..25)
        .map(|i| {
            let stars = if i == 0 { 1_500 } else { 0 };
            RepositorySnapshot::new(format!("r{}", i), now() - Duration::days(30))
                .stars(stars)
                .language("Rust")
        })
        .collect();

    let report = AuraEngine::evaluate(&p, &rs, now()).unwrap();
    assert!(report.signals.has_popular_repo);
    assert_eq!(report.signals.primary_language.as_deref(), Some("Rust"));
    assert_eq!(report.category.kind, AuraKind::EmergingCreator);
    assert_eq!(report.category.label, "Emerging Creator");
}

#[test]
fn test_points_stay_in_range() {
    let extremes = [
        (0, 0, 0),
        (10_000_000, 0, 1),
        (10_000_000, 9_000_000, 40),
        (3, 1, 1),
    ];

    for (followers, stars, count) in extremes {
        let p = profile(followers, 100_000);
        let report = AuraEngine::evaluate(&p, &repos(count, stars), now()).unwrap();
        assert!(report.points <= MAX_AURA_POINTS, "{} out of range", report.points);
    }
}

#[test]
fn test_evaluation_is_repeatable() {
    let p = profile(4_321, 77).bio("building things");
    let rs = repos(12, 321);
    let first = AuraEngine::evaluate(&p, &rs, now()).unwrap();
    for _ in 0..5 {
        assert_eq!(AuraEngine::evaluate(&p, &rs, now()).unwrap(), first);
    }
}

#[test]
fn test_snapshot_file_round_through_engine() {
    let json = r#"{
        "profile": {"login": "octo", "followers": 5, "public_repos": 22,
                    "bio": null, "created_at": "2019-02-02T00:00:00Z"},
        "repositories": [
            {"name": "a", "stargazers_count": 3, "watchers_count": 3, "fork": false,
             "language": "Go", "updated_at": "2025-06-01T00:00:00Z"},
            {"name": "b", "stargazers_count": 1, "watchers_count": 1, "fork": false,
             "language": null, "updated_at": "2021-06-01T00:00:00Z"}
        ]
    }"#;

    let (p, rs) = SnapshotFile::from_json(json).unwrap().into_snapshots();
    let report = AuraEngine::evaluate(&p, &rs, now()).unwrap();
    assert_eq!(report.category.label, "Go Specialist");
    assert_eq!(report.signals.active_repo_count, 1);
}

#[tokio::test]
async fn test_analyze_passes_through_rate_limit() {
    let mut source = MockSource::new();
    source
        .expect_fetch_profile()
        .returning(|_| Err(Error::RateLimitExceeded { reset_at: None }));
    source.expect_fetch_repositories().returning(|_| Ok(Vec::new()));
    source
        .expect_fetch_activity()
        .returning(|_, _| Ok(ActivitySummary::default()));

    let err = AuraEngine::analyze(&source, "busy", now(), true).await.unwrap_err();
    assert!(matches!(err, Error::RateLimitExceeded { .. }));
}
