//! The aura rule table.
//!
//! Classification is a first-match-wins walk over [`AURA_RULES`]. Every
//! entry is plain data so the table can be printed, audited, and checked
//! by tests without reading any control flow.

use serde::{Deserialize, Serialize};

use crate::signals::DerivedSignals;

/// Bio phrases that mark someone as a community builder
pub const COMMUNITY_KEYWORDS: &[&str] = &["open source", "contributor"];

/// Coarse rank bucket of a category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Legendary,
    Elite,
    Master,
    Expert,
    Advanced,
    Established,
    Growing,
    Active,
    Special,
    Specialist,
    Emerging,
    Noob,
}

impl Tier {
    pub const ALL: [Tier; 12] = [
        Tier::Legendary,
        Tier::Elite,
        Tier::Master,
        Tier::Expert,
        Tier::Advanced,
        Tier::Established,
        Tier::Growing,
        Tier::Active,
        Tier::Special,
        Tier::Specialist,
        Tier::Emerging,
        Tier::Noob,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Legendary => "legendary",
            Tier::Elite => "elite",
            Tier::Master => "master",
            Tier::Expert => "expert",
            Tier::Advanced => "advanced",
            Tier::Established => "established",
            Tier::Growing => "growing",
            Tier::Active => "active",
            Tier::Special => "special",
            Tier::Specialist => "specialist",
            Tier::Emerging => "emerging",
            Tier::Noob => "noob",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Static copy attached to each kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub label: &'static str,
    pub description: &'static str,
    /// Opaque style token for whatever renders the card
    pub color_tag: &'static str,
    pub tier: Tier,
}

impl KindInfo {
    const fn new(
        label: &'static str,
        description: &'static str,
        color_tag: &'static str,
        tier: Tier,
    ) -> Self {
        Self {
            label,
            description,
            color_tag,
            tier,
        }
    }
}

/// The closed set of auras
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AuraKind {
    Noob,
    CommunityBuilder,
    // legendary
    GlobalTechTitan,
    TechVisionary,
    ThoughtLeader,
    // elite
    TechLuminary,
    IndustryTrailblazer,
    InfluentialInnovator,
    // master
    OpenSourceIcon,
    MasterBuilder,
    RisingInfluencer,
    // expert
    TechInnovator,
    ProlificMaintainer,
    CommunityFavorite,
    // advanced
    StarArchitect,
    MomentumMaker,
    RespectedEngineer,
    // established
    TrustedCreator,
    ConsistentShipper,
    GrowingContributor,
    // growing
    BreakoutBuilder,
    SteadyHacker,
    EmergingTalent,
    // active
    EmergingCreator,
    ActiveTinkerer,
    BuddingDeveloper,
    // special cases
    ProjectMaestro,
    OpenSourceAdvocate,
    LanguageSpecialist,
    // defaults
    FreshExplorer,
    CodeExplorer,
}

impl AuraKind {
    pub const ALL: [AuraKind; 31] = [
        AuraKind::Noob,
        AuraKind::CommunityBuilder,
        AuraKind::GlobalTechTitan,
        AuraKind::TechVisionary,
        AuraKind::ThoughtLeader,
        AuraKind::TechLuminary,
        AuraKind::IndustryTrailblazer,
        AuraKind::InfluentialInnovator,
        AuraKind::OpenSourceIcon,
        AuraKind::MasterBuilder,
        AuraKind::RisingInfluencer,
        AuraKind::TechInnovator,
        AuraKind::ProlificMaintainer,
        AuraKind::CommunityFavorite,
        AuraKind::StarArchitect,
        AuraKind::MomentumMaker,
        AuraKind::RespectedEngineer,
        AuraKind::TrustedCreator,
        AuraKind::ConsistentShipper,
        AuraKind::GrowingContributor,
        AuraKind::BreakoutBuilder,
        AuraKind::SteadyHacker,
        AuraKind::EmergingTalent,
        AuraKind::EmergingCreator,
        AuraKind::ActiveTinkerer,
        AuraKind::BuddingDeveloper,
        AuraKind::ProjectMaestro,
        AuraKind::OpenSourceAdvocate,
        AuraKind::LanguageSpecialist,
        AuraKind::FreshExplorer,
        AuraKind::CodeExplorer,
    ];

    pub fn info(&self) -> KindInfo {
        use Tier::*;
        match self {
            AuraKind::Noob => KindInfo::new("Noob", "You need to work hard, LFG!", "gray-red", Noob),
            AuraKind::CommunityBuilder => KindInfo::new(
                "Community Builder",
                "Passionate about collaborative development and knowledge sharing.",
                "green-teal",
                Special,
            ),
            AuraKind::GlobalTechTitan => KindInfo::new(
                "Global Tech Titan",
                "A legendary developer with massive global influence and unprecedented impact.",
                "red-gold",
                Legendary,
            ),
            AuraKind::TechVisionary => KindInfo::new(
                "Tech Visionary",
                "An extraordinary developer shaping the future of technology with groundbreaking contributions.",
                "purple-indigo",
                Legendary,
            ),
            AuraKind::ThoughtLeader => KindInfo::new(
                "Thought Leader",
                "A highly influential developer with significant industry recognition and impact.",
                "blue-purple",
                Legendary,
            ),
            AuraKind::TechLuminary => KindInfo::new(
                "Tech Luminary",
                "A prominent developer with substantial community influence and innovative contributions.",
                "green-blue",
                Elite,
            ),
            AuraKind::IndustryTrailblazer => KindInfo::new(
                "Industry Trailblazer",
                "Sets the pace for the industry with work that others build on.",
                "amber-rose",
                Elite,
            ),
            AuraKind::InfluentialInnovator => KindInfo::new(
                "Influential Innovator",
                "A recognized developer with significant contributions and growing community impact.",
                "orange-red",
                Elite,
            ),
            AuraKind::OpenSourceIcon => KindInfo::new(
                "Open Source Icon",
                "Maintains projects the whole ecosystem depends on.",
                "violet-fuchsia",
                Master,
            ),
            AuraKind::MasterBuilder => KindInfo::new(
                "Master Builder",
                "Ships relentlessly and keeps a large body of work alive.",
                "cyan-blue",
                Master,
            ),
            AuraKind::RisingInfluencer => KindInfo::new(
                "Rising Influencer",
                "An emerging developer with substantial potential and increasing community recognition.",
                "yellow-orange",
                Master,
            ),
            AuraKind::TechInnovator => KindInfo::new(
                "Tech Innovator",
                "A passionate developer making significant strides in their technological journey.",
                "teal-green",
                Expert,
            ),
            AuraKind::ProlificMaintainer => KindInfo::new(
                "Prolific Maintainer",
                "Keeps a steady stream of projects moving forward.",
                "sky-indigo",
                Expert,
            ),
            AuraKind::CommunityFavorite => KindInfo::new(
                "Community Favorite",
                "A familiar name the community keeps coming back to.",
                "rose-pink",
                Expert,
            ),
            AuraKind::StarArchitect => KindInfo::new(
                "Star Architect",
                "Designs projects that collect stars wherever they land.",
                "gold-amber",
                Advanced,
            ),
            AuraKind::MomentumMaker => KindInfo::new(
                "Momentum Maker",
                "Constantly shipping, with momentum that shows in every repository.",
                "lime-emerald",
                Advanced,
            ),
            AuraKind::RespectedEngineer => KindInfo::new(
                "Respected Engineer",
                "A seasoned engineer with a loyal and growing audience.",
                "slate-blue",
                Advanced,
            ),
            AuraKind::TrustedCreator => KindInfo::new(
                "Trusted Creator",
                "Builds tools people trust and star.",
                "indigo-sky",
                Established,
            ),
            AuraKind::ConsistentShipper => KindInfo::new(
                "Consistent Shipper",
                "Pushes code week in, week out.",
                "emerald-teal",
                Established,
            ),
            AuraKind::GrowingContributor => KindInfo::new(
                "Growing Contributor",
                "A dedicated developer with increasing impact and community engagement.",
                "indigo-purple",
                Established,
            ),
            AuraKind::BreakoutBuilder => KindInfo::new(
                "Breakout Builder",
                "A project or two have broken out, and people noticed.",
                "fuchsia-rose",
                Growing,
            ),
            AuraKind::SteadyHacker => KindInfo::new(
                "Steady Hacker",
                "Keeps hacking on a healthy set of active projects.",
                "cyan-teal",
                Growing,
            ),
            AuraKind::EmergingTalent => KindInfo::new(
                "Emerging Talent",
                "A promising developer building their reputation and expanding their skills.",
                "pink-red",
                Growing,
            ),
            AuraKind::EmergingCreator => KindInfo::new(
                "Emerging Creator",
                "Already creating work that earns real stars.",
                "orange-amber",
                Active,
            ),
            AuraKind::ActiveTinkerer => KindInfo::new(
                "Active Tinkerer",
                "Always tinkering, with fresh commits across several repositories.",
                "lime-green",
                Active,
            ),
            AuraKind::BuddingDeveloper => KindInfo::new(
                "Budding Developer",
                "An enthusiastic developer starting to make their mark in the tech community.",
                "emerald-cyan",
                Active,
            ),
            AuraKind::ProjectMaestro => KindInfo::new(
                "Project Maestro",
                "Orchestrates a large portfolio of well-loved projects.",
                "purple-pink",
                Special,
            ),
            AuraKind::OpenSourceAdvocate => KindInfo::new(
                "Open Source Advocate",
                "Skilled at building upon and improving existing projects.",
                "amber-orange",
                Special,
            ),
            AuraKind::LanguageSpecialist => KindInfo::new(
                "Specialist",
                "Deep expertise in one language, proven across many repositories.",
                "blue-cyan",
                Specialist,
            ),
            AuraKind::FreshExplorer => KindInfo::new(
                "Fresh Explorer",
                "A brand new account with the whole journey ahead.",
                "sky-violet",
                Emerging,
            ),
            AuraKind::CodeExplorer => KindInfo::new(
                "Code Explorer",
                "A passionate developer exploring the world of code.",
                "gray-slate",
                Emerging,
            ),
        }
    }

    pub fn tier(&self) -> Tier {
        self.info().tier
    }
}

/// A single test against the derived signals
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    FollowersAtMost(u64),
    NoRepositories,
    BioContainsAny(&'static [&'static str]),
    StarsAbove(u64),
    PublicReposAbove(u64),
    ForkRatioAbove(f64),
    HasPrimaryLanguage,
    AccountYoungerThan(u32),
}

impl Condition {
    pub fn holds(&self, signals: &DerivedSignals) -> bool {
        match *self {
            Condition::FollowersAtMost(n) => signals.followers <= n,
            Condition::NoRepositories => signals.repo_count == 0,
            Condition::BioContainsAny(words) => {
                words.iter().any(|w| signals.bio_lowercase.contains(w))
            }
            Condition::StarsAbove(n) => signals.total_stars > n,
            Condition::PublicReposAbove(n) => signals.public_repo_count > n,
            Condition::ForkRatioAbove(r) => signals.fork_ratio > r,
            Condition::HasPrimaryLanguage => signals.primary_language.is_some(),
            Condition::AccountYoungerThan(years) => signals.account_age_years < years,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::FollowersAtMost(n) => write!(f, "followers <= {}", n),
            Condition::NoRepositories => write!(f, "no repositories"),
            Condition::BioContainsAny(words) => write!(f, "bio mentions {:?}", words),
            Condition::StarsAbove(n) => write!(f, "stars > {}", n),
            Condition::PublicReposAbove(n) => write!(f, "public repos > {}", n),
            Condition::ForkRatioAbove(r) => write!(f, "fork ratio > {}", r),
            Condition::HasPrimaryLanguage => write!(f, "has a primary language"),
            Condition::AccountYoungerThan(y) => write!(f, "account age < {} years", y),
        }
    }
}

/// One follower band of the tier ladder
///
/// Bands have an exclusive floor and an inclusive ceiling. Inside a band
/// stars are checked first, then momentum (a popular repository or enough
/// active ones), then the band's generic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderBand {
    pub above: u64,
    /// `None` for the open-ended top band
    pub at_most: Option<u64>,
    pub stars_above: u64,
    pub active_at_least: u64,
    pub stars_kind: AuraKind,
    pub momentum_kind: AuraKind,
    pub fallback_kind: AuraKind,
}

impl LadderBand {
    pub fn contains(&self, followers: u64) -> bool {
        followers > self.above && self.at_most.map_or(true, |max| followers <= max)
    }

    pub fn resolve(&self, signals: &DerivedSignals) -> Option<AuraKind> {
        if !self.contains(signals.followers) {
            return None;
        }

        if signals.total_stars > self.stars_above {
            Some(self.stars_kind)
        } else if signals.has_popular_repo || signals.active_repo_count >= self.active_at_least {
            Some(self.momentum_kind)
        } else {
            Some(self.fallback_kind)
        }
    }
}

/// What a rule yields once its conditions hold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Kind(AuraKind),
    Band(LadderBand),
}

/// Conditions (all must hold) mapped to an outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuraRule {
    pub name: &'static str,
    pub when: &'static [Condition],
    pub outcome: Outcome,
}

impl AuraRule {
    pub fn resolve(&self, signals: &DerivedSignals) -> Option<AuraKind> {
        if !self.when.iter().all(|c| c.holds(signals)) {
            return None;
        }

        match &self.outcome {
            Outcome::Kind(kind) => Some(*kind),
            Outcome::Band(band) => band.resolve(signals),
        }
    }

    pub fn band(&self) -> Option<&LadderBand> {
        match &self.outcome {
            Outcome::Band(band) => Some(band),
            Outcome::Kind(_) => None,
        }
    }
}

/// Ordered rule table, first match wins. The last rule is unconditional.
pub static AURA_RULES: &[AuraRule] = &[
    AuraRule {
        name: "too few followers",
        when: &[Condition::FollowersAtMost(2)],
        outcome: Outcome::Kind(AuraKind::Noob),
    },
    AuraRule {
        name: "no repositories",
        when: &[Condition::NoRepositories],
        outcome: Outcome::Kind(AuraKind::Noob),
    },
    AuraRule {
        name: "community bio",
        when: &[Condition::BioContainsAny(COMMUNITY_KEYWORDS)],
        outcome: Outcome::Kind(AuraKind::CommunityBuilder),
    },
    AuraRule {
        name: "legendary band",
        when: &[],
        outcome: Outcome::Band(LadderBand {
            above: 100_000,
            at_most: None,
            stars_above: 100_000,
            active_at_least: 10,
            stars_kind: AuraKind::GlobalTechTitan,
            momentum_kind: AuraKind::TechVisionary,
            fallback_kind: AuraKind::ThoughtLeader,
        }),
    },
    AuraRule {
        name: "elite band",
        when: &[],
        outcome: Outcome::Band(LadderBand {
            above: 50_000,
            at_most: Some(100_000),
            stars_above: 50_000,
            active_at_least: 10,
            stars_kind: AuraKind::TechLuminary,
            momentum_kind: AuraKind::IndustryTrailblazer,
            fallback_kind: AuraKind::InfluentialInnovator,
        }),
    },
    AuraRule {
        name: "master band",
        when: &[],
        outcome: Outcome::Band(LadderBand {
            above: 10_000,
            at_most: Some(50_000),
            stars_above: 20_000,
            active_at_least: 8,
            stars_kind: AuraKind::OpenSourceIcon,
            momentum_kind: AuraKind::MasterBuilder,
            fallback_kind: AuraKind::RisingInfluencer,
        }),
    },
    AuraRule {
        name: "expert band",
        when: &[],
        outcome: Outcome::Band(LadderBand {
            above: 5_000,
            at_most: Some(10_000),
            stars_above: 10_000,
            active_at_least: 8,
            stars_kind: AuraKind::TechInnovator,
            momentum_kind: AuraKind::ProlificMaintainer,
            fallback_kind: AuraKind::CommunityFavorite,
        }),
    },
    AuraRule {
        name: "advanced band",
        when: &[],
        outcome: Outcome::Band(LadderBand {
            above: 2_000,
            at_most: Some(5_000),
            stars_above: 5_000,
            active_at_least: 6,
            stars_kind: AuraKind::StarArchitect,
            momentum_kind: AuraKind::MomentumMaker,
            fallback_kind: AuraKind::RespectedEngineer,
        }),
    },
    AuraRule {
        name: "established band",
        when: &[],
        outcome: Outcome::Band(LadderBand {
            above: 1_000,
            at_most: Some(2_000),
            stars_above: 2_000,
            active_at_least: 5,
            stars_kind: AuraKind::TrustedCreator,
            momentum_kind: AuraKind::ConsistentShipper,
            fallback_kind: AuraKind::GrowingContributor,
        }),
    },
    AuraRule {
        name: "growing band",
        when: &[],
        outcome: Outcome::Band(LadderBand {
            above: 500,
            at_most: Some(1_000),
            stars_above: 1_000,
            active_at_least: 4,
            stars_kind: AuraKind::BreakoutBuilder,
            momentum_kind: AuraKind::SteadyHacker,
            fallback_kind: AuraKind::EmergingTalent,
        }),
    },
    AuraRule {
        name: "active band",
        when: &[],
        outcome: Outcome::Band(LadderBand {
            above: 100,
            at_most: Some(500),
            stars_above: 500,
            active_at_least: 3,
            stars_kind: AuraKind::EmergingCreator,
            momentum_kind: AuraKind::ActiveTinkerer,
            fallback_kind: AuraKind::BuddingDeveloper,
        }),
    },
    AuraRule {
        name: "project maestro",
        when: &[Condition::PublicReposAbove(100), Condition::StarsAbove(1000)],
        outcome: Outcome::Kind(AuraKind::ProjectMaestro),
    },
    AuraRule {
        name: "fork heavy",
        when: &[Condition::ForkRatioAbove(0.7), Condition::PublicReposAbove(30)],
        outcome: Outcome::Kind(AuraKind::OpenSourceAdvocate),
    },
    AuraRule {
        name: "language specialist",
        when: &[Condition::HasPrimaryLanguage, Condition::PublicReposAbove(20)],
        outcome: Outcome::Kind(AuraKind::LanguageSpecialist),
    },
    AuraRule {
        name: "new account",
        when: &[Condition::AccountYoungerThan(1)],
        outcome: Outcome::Kind(AuraKind::FreshExplorer),
    },
    AuraRule {
        name: "default",
        when: &[],
        outcome: Outcome::Kind(AuraKind::CodeExplorer),
    },
];

/// The ladder bands in table order
pub fn ladder() -> impl Iterator<Item = &'static LadderBand> {
    AURA_RULES.iter().filter_map(AuraRule::band)
}
