mod output;

use anyhow::Context;
use approval_core::{
    config::{TrackerConfig, WarnLevel},
    dispatch::Dispatcher,
    event::RawEvent,
    github::GitHubClient,
    types::GovernanceKind,
};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;
use tracing::{info, warn};

/// Options shared by the pipeline and SIG approval binaries. The event
/// fields mirror the GitHub Actions webhook payload.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// GitHub organization
    #[arg(long)]
    pub org: String,

    /// GitHub repository
    #[arg(long)]
    pub repo: String,

    /// Issue number
    #[arg(long)]
    pub issue_number: u64,

    /// GitHub event name (issues, issue_comment)
    #[arg(long)]
    pub event_name: Option<String>,

    /// GitHub event action (opened, labeled, unlabeled, closed, ...)
    #[arg(long)]
    pub event_action: Option<String>,

    /// Issue state (open, closed)
    #[arg(long)]
    pub issue_state: Option<String>,

    /// Label name for label events
    #[arg(long)]
    pub label_name: Option<String>,

    /// Issue state reason (completed, not_planned)
    #[arg(long)]
    pub issue_state_reason: Option<String>,

    /// Override the REST API root
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// YAML file with tracker settings (team slugs, URLs, timeout)
    #[arg(long, env = "APPROVAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output the outcome as JSON
    #[arg(long, short = 'j')]
    pub json: bool,
}

impl Cli {
    pub fn raw_event(&self) -> RawEvent {
        RawEvent {
            event_name: self.event_name.clone(),
            event_action: self.event_action.clone(),
            issue_state: self.issue_state.clone(),
            label_name: self.label_name.clone(),
            issue_state_reason: self.issue_state_reason.clone(),
        }
    }
}

fn binary_name(kind: GovernanceKind) -> &'static str {
    match kind {
        GovernanceKind::Pipeline => "pipeline-approval",
        GovernanceKind::Sig => "sig-approval",
    }
}

fn about(kind: GovernanceKind) -> &'static str {
    match kind {
        GovernanceKind::Pipeline => "Process pipeline proposal approval automation",
        GovernanceKind::Sig => "Process SIG proposal approval automation",
    }
}

/// Parse the command line under the binary name for `kind`.
pub fn parse_for(kind: GovernanceKind) -> Cli {
    let matches = Cli::command()
        .name(binary_name(kind))
        .about(about(kind))
        .get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn load_config(cli: &Cli) -> anyhow::Result<TrackerConfig> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => TrackerConfig::default(),
    };
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }

    let warnings = config.validate();
    for w in &warnings {
        warn!("config: {}", w.message);
    }
    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("invalid configuration");
    }
    Ok(config)
}

pub fn run(kind: GovernanceKind, cli: &Cli) -> anyhow::Result<()> {
    info!(issue = cli.issue_number, governance = %kind, "processing approval");

    let config = load_config(cli)?;
    let event = cli.raw_event().classify();
    let client = GitHubClient::new(&config, &cli.github_token, &cli.org, &cli.repo)
        .context("failed to build GitHub client")?;

    let outcome = Dispatcher::new(&client, &config, kind)
        .handle(cli.issue_number, &event)
        .with_context(|| format!("{kind} approval failed for issue #{}", cli.issue_number))?;

    if cli.json {
        output::print_json(&outcome)?;
    } else {
        println!("{}", output::summary(cli.issue_number, &outcome));
    }
    Ok(())
}

/// Entry point for both binaries.
pub fn main_for(kind: GovernanceKind) {
    let cli = parse_for(kind);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(kind, &cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
