use crate::{engine::AuraReport, scorer::MAX_AURA_POINTS, Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(ExportFormat::Text),
            "json" => Some(ExportFormat::Json),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" | "txt" => Some(ExportFormat::Text),
            "json" => Some(ExportFormat::Json),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }
}

/// Renders aura reports for the terminal or for files
pub struct Exporter;

impl Exporter {
    pub fn render(report: &AuraReport, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Text => Ok(Self::to_text(report)),
            ExportFormat::Json => Self::to_json(report),
            ExportFormat::Markdown => Ok(Self::to_markdown(report)),
        }
    }

    /// Export a report to a file, picking the format from the extension
    pub fn export_to_file<P: AsRef<Path>>(report: &AuraReport, path: P) -> Result<()> {
        let path = path.as_ref();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| {
                Error::ConfigError(
                    "Could not determine export format from extension. Use .txt, .json, or .md"
                        .to_string(),
                )
            })?;

        let content = Self::render(report, format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    pub fn to_json(report: &AuraReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    pub fn to_text(report: &AuraReport) -> String {
        let mut output = String::new();
        let signals = &report.signals;
        let breakdown = &report.breakdown;

        output.push_str(&format!("{} (@{})\n\n", report.display_name, report.login));
        output.push_str(&format!(
            "Aura:    {} [{}]\n",
            report.category.label, report.category.tier
        ));
        output.push_str(&format!("         {}\n", report.category.description));
        output.push_str(&format!("Points:  {} / {}\n\n", report.points, MAX_AURA_POINTS));

        output.push_str(&format!(
            "Followers: {}  Repositories: {}  Stars: {}  Watchers: {}\n",
            Self::format_number(signals.followers),
            Self::format_number(signals.public_repo_count),
            Self::format_number(signals.total_stars),
            Self::format_number(signals.total_watchers),
        ));
        if let Some(lang) = &signals.primary_language {
            output.push_str(&format!("Primary language: {}\n", lang));
        }
        output.push_str(&format!(
            "Active repositories: {}  Account age: {} years\n\n",
            signals.active_repo_count, signals.account_age_years
        ));

        output.push_str("Breakdown:\n");
        for (name, points, max) in Self::terms(report) {
            output.push_str(&format!("  {:<14} {:>6.1} / {}\n", name, points, max));
        }
        for achievement in &breakdown.achievements {
            output.push_str(&format!(
                "  + {:<12} {:>6}\n",
                achievement.label(),
                achievement.points()
            ));
        }

        if let Some(activity) = &report.activity {
            output.push_str(&format!(
                "\nActivity: {} recent contributions, {} in the last year\n",
                activity.recent, activity.last_year
            ));
        }

        output
    }

    pub fn to_markdown(report: &AuraReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "# {} Aura: {}\n\n",
            report.display_name, report.category.label
        ));
        output.push_str(&format!("> {}\n\n", report.category.description));
        output.push_str(&format!(
            "**Aura Points:** {} / {} | **Tier:** {}\n\n",
            report.points, MAX_AURA_POINTS, report.category.tier
        ));

        output.push_str("| Component | Points | Max |\n");
        output.push_str("|-----------|--------|-----|\n");
        for (name, points, max) in Self::terms(report) {
            output.push_str(&format!("| {} | {:.1} | {} |\n", name, points, max));
        }

        if !report.breakdown.achievements.is_empty() {
            output.push_str("\n**Achievements:** ");
            let labels: Vec<_> = report
                .breakdown
                .achievements
                .iter()
                .map(|a| format!("{} (+{})", a.label(), a.points()))
                .collect();
            output.push_str(&labels.join(", "));
            output.push('\n');
        }

        if let Some(activity) = &report.activity {
            output.push_str(&format!(
                "\n**Activity:** {} recent contributions, {} in the last year\n",
                activity.recent, activity.last_year
            ));
        }

        output
    }

    fn terms(report: &AuraReport) -> [(&'static str, f64, u32); 6] {
        let b = &report.breakdown;
        [
            ("Followers", b.follower_points, 400),
            ("Stars", b.star_points, 300),
            ("Repositories", b.repo_points, 100),
            ("Watchers", b.watcher_points, 50),
            ("Active repos", b.active_repo_bonus, 50),
            ("Account age", b.account_age_bonus, 50),
        ]
    }

    /// Format numbers with k/M suffixes
    fn format_number(num: u64) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}k", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivitySummary;
    use crate::engine::AuraEngine;
    use crate::models::{ProfileSnapshot, RepositorySnapshot};
    use chrono::{DateTime, Utc};

    fn report() -> AuraReport {
        let now: DateTime<Utc> = "2025-06-15T12:00:00Z".parse().unwrap();
        let mut profile = ProfileSnapshot::new("ferris", "2016-04-01T00:00:00Z".parse().unwrap())
            .followers(60_001)
            .public_repos(40);
        profile.name = Some("Ferris the Crab".to_string());
        let repos = vec![RepositorySnapshot::new("serde-but-crabby", now)
            .stars(1_234)
            .watchers(1_234)
            .language("Rust")];

        let mut report = AuraEngine::evaluate(&profile, &repos, now).unwrap();
        report.activity = Some(ActivitySummary {
            recent: 12,
            last_year: 9,
        });
        report
    }

    #[test]
    fn test_export_format_detection() {
        assert_eq!(ExportFormat::from_extension("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_extension("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_extension("md"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::from_extension("txt"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::from_extension("csv"), None);

        assert_eq!(ExportFormat::from_name("text"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::from_name("Markdown"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::from_name("yaml"), None);
    }

    #[test]
    fn test_json_export() {
        let json = Exporter::to_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["login"], "ferris");
        assert_eq!(value["category"]["type"], "Industry Trailblazer");
        assert_eq!(value["category"]["tier"], "elite");
        assert_eq!(value["activity"]["recent"], 12);
    }

    #[test]
    fn test_text_export() {
        let text = Exporter::to_text(&report());
        assert!(text.starts_with("Ferris the Crab (@ferris)"));
        assert!(text.contains("Aura:    Industry Trailblazer [elite]"));
        assert!(text.contains("Followers: 60.0k"));
        assert!(text.contains("Primary language: Rust"));
        assert!(text.contains("Mass following"));
        assert!(text.contains("12 recent contributions, 9 in the last year"));
    }

    #[test]
    fn test_markdown_export() {
        let md = Exporter::to_markdown(&report());
        assert!(md.contains("# Ferris the Crab Aura: Industry Trailblazer"));
        assert!(md.contains("| Followers | 240.0 | 400 |"));
        assert!(md.contains("Mass following (+100)"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(Exporter::format_number(999), "999");
        assert_eq!(Exporter::format_number(1_500), "1.5k");
        assert_eq!(Exporter::format_number(2_000_000), "2.0M");
    }
}
