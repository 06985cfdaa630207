// Aura classification and scoring - the brain of the operation
pub mod activity;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod providers;
pub mod rules;
pub mod scorer;
pub mod signals;
pub mod source;

pub use activity::ActivitySummary;
pub use classifier::{AuraCategory, Classifier};
pub use config::Config;
pub use engine::{AuraEngine, AuraReport};
pub use error::Error;
pub use export::{ExportFormat, Exporter};
pub use models::{ProfileSnapshot, RepositorySnapshot, SnapshotFile};
pub use rules::{AuraKind, Tier, AURA_RULES};
pub use scorer::{Achievement, ScoreBreakdown, Scorer, MAX_AURA_POINTS};
pub use signals::DerivedSignals;
pub use source::ProfileSource;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
