use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::{AuraKind, Tier, AURA_RULES};
use crate::signals::DerivedSignals;

/// The aura a profile ends up with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuraCategory {
    pub kind: AuraKind,
    /// Display label, e.g. "Tech Luminary" or "Rust Specialist"
    #[serde(rename = "type")]
    pub label: String,
    pub description: String,
    pub color_tag: String,
    pub tier: Tier,
}

impl AuraCategory {
    fn build(kind: AuraKind, signals: &DerivedSignals) -> Self {
        let info = kind.info();
        let label = match kind {
            AuraKind::LanguageSpecialist => format!(
                "{} {}",
                signals.primary_language.as_deref().unwrap_or("Language"),
                info.label
            ),
            _ => info.label.to_string(),
        };

        Self {
            kind,
            label,
            description: info.description.to_string(),
            color_tag: info.color_tag.to_string(),
            tier: info.tier,
        }
    }
}

/// Maps derived signals to exactly one aura by walking the rule table
pub struct Classifier;

impl Classifier {
    pub fn classify(signals: &DerivedSignals) -> AuraCategory {
        let (rule, kind) = AURA_RULES
            .iter()
            .find_map(|rule| rule.resolve(signals).map(|kind| (rule.name, kind)))
            // Unreachable: the table ends with an unconditional rule
            .unwrap_or(("default", AuraKind::CodeExplorer));

        debug!(rule, ?kind, "aura rule matched");
        AuraCategory::build(kind, signals)
    }
}
