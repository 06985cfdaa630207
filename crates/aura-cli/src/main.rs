use anyhow::Context;
use aura_api::RetryConfig;
use aura_core::config::TOKEN_ENV_VAR;
use aura_core::providers::GitHubSource;
use aura_core::rules::{AuraRule, Outcome};
use aura_core::{AuraEngine, AuraReport, Config, ExportFormat, Exporter, SnapshotFile, AURA_RULES};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aura")]
#[command(version, about = "Discover the aura of a GitHub developer", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch a GitHub profile and compute its aura
    Analyze {
        /// GitHub login
        login: String,
        /// Output format: text, json or markdown
        #[arg(short, long)]
        format: Option<String>,
        /// GitHub token (falls back to $GITHUB_TOKEN, then the config file)
        #[arg(long)]
        token: Option<String>,
        /// Skip fetching recent events
        #[arg(long)]
        no_activity: bool,
        /// Write the report to a file (.txt, .json or .md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate a saved JSON snapshot without touching the network
    Evaluate {
        /// File with {"profile": {...}, "repositories": [...]}
        file: PathBuf,
        /// Output format: text, json or markdown
        #[arg(short, long)]
        format: Option<String>,
        /// Evaluation time as RFC 3339, defaults to now
        #[arg(long)]
        now: Option<String>,
        /// Write the report to a file (.txt, .json or .md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the classification rules in evaluation order
    Rules,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aura=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Commands::Analyze {
            login,
            format,
            token,
            no_activity,
            output,
        } => {
            let login = normalize_login(&login)?;
            tracing::info!("Analyzing GitHub user: {}", login);

            let token = config.resolve_token(token, std::env::var(TOKEN_ENV_VAR).ok());
            if token.is_none() {
                tracing::warn!("No GitHub token configured, unauthenticated rate limits apply");
            }

            let source = GitHubSource::with_settings(
                token,
                &config.github.api_url,
                RetryConfig::from(&config.retry),
            )?;

            let report = AuraEngine::analyze(&source, &login, Utc::now(), !no_activity)
                .await
                .with_context(|| format!("Could not analyze {}", login))?;

            emit(&report, &config, format.as_deref(), output.as_deref())?;
        }
        Commands::Evaluate {
            file,
            format,
            now,
            output,
        } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Could not read {}", file.display()))?;
            let (profile, repos) = SnapshotFile::from_json(&contents)?.into_snapshots();

            let now = match now {
                Some(raw) => parse_instant(&raw)?,
                None => Utc::now(),
            };

            let report = AuraEngine::evaluate(&profile, &repos, now)?;
            emit(&report, &config, format.as_deref(), output.as_deref())?;
        }
        Commands::Rules => print_rules(),
    }

    Ok(())
}

fn normalize_login(raw: &str) -> anyhow::Result<String> {
    let login = raw.trim();
    if login.is_empty() {
        anyhow::bail!("GitHub login must not be empty");
    }
    Ok(login.to_string())
}

fn parse_instant(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid --now value: {}", raw))?;
    Ok(parsed.with_timezone(&Utc))
}

fn emit(
    report: &AuraReport,
    config: &Config,
    format: Option<&str>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(path) = output {
        Exporter::export_to_file(report, path)?;
        println!("Report written to {}", path.display());
        return Ok(());
    }

    let format = match format {
        Some(name) => ExportFormat::from_name(name)
            .with_context(|| format!("Unknown format: {} (use text, json or markdown)", name))?,
        None => config.output_format()?,
    };

    println!("{}", Exporter::render(report, format)?);
    Ok(())
}

fn print_rules() {
    for (i, rule) in AURA_RULES.iter().enumerate() {
        println!("{:>2}. {} ({})", i + 1, rule.name, describe_conditions(rule));

        match &rule.outcome {
            Outcome::Kind(kind) => {
                let info = kind.info();
                println!("      -> {} [{}]", info.label, info.tier);
            }
            Outcome::Band(band) => {
                let tier = band.fallback_kind.tier();
                println!(
                    "      stars > {}  -> {} [{}]",
                    band.stars_above,
                    band.stars_kind.info().label,
                    tier
                );
                println!(
                    "      popular repo or {}+ active  -> {} [{}]",
                    band.active_at_least,
                    band.momentum_kind.info().label,
                    tier
                );
                println!("      otherwise  -> {} [{}]", band.fallback_kind.info().label, tier);
            }
        }
    }
}

fn describe_conditions(rule: &AuraRule) -> String {
    if let Some(band) = rule.band() {
        return match band.at_most {
            Some(max) => format!("{} < followers <= {}", band.above, max),
            None => format!("followers > {}", band.above),
        };
    }

    if rule.when.is_empty() {
        return "always".to_string();
    }

    rule.when
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" and ")
}
