//! labelctl - keep WHATWG repository labels in agreement with the local
//! labels file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use github::GitHubAuthority;
use labels::{Label, SyncReport};

/// Where the rendered Markdown documentation lands.
const DOCS_FILE: &str = "LABELS.md";

#[derive(Parser)]
#[command(
    name = "labelctl",
    version,
    about = "Label maintenance for WHATWG repositories",
    long_about = "Maintain the local labels file, merge the upstream W3C horizontal labels\n\
                  into it, and converge the live labels of WHATWG repositories toward it."
)]
struct Cli {
    /// Path to the labels file.
    #[arg(long, global = true, default_value = "labels.json")]
    labels: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the upstream W3C horizontal labels into the local set.
    ImportW3c,

    /// Sort the labels file and regenerate the Markdown documentation.
    Update,

    /// Converge the labels of a single repository.
    Sync {
        /// Repository to update, e.g. whatwg/fetch.
        #[arg(long)]
        repository: String,

        /// GitHub token that allows modifying labels.
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Converge the labels of every repository in the workstream database.
    SyncAll {
        /// GitHub token that allows modifying labels.
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            // Operator-facing output goes to stdout/stderr directly;
            // tracing is opt-in via RUST_LOG.
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::ImportW3c => import_w3c(&cli.labels).await,
        Commands::Update => update(&cli.labels),
        Commands::Sync { repository, token } => {
            let (organization, repository) = repository
                .split_once('/')
                .context("--repository must look like organization/repository")?;
            sync_one(&cli.labels, organization, repository, &token).await
        }
        Commands::SyncAll { token } => sync_all(&cli.labels, &token).await,
    }
}

/// Fetch the upstream feed, merge it into the local set, and persist.
/// A merge inconsistency aborts before anything is written.
async fn import_w3c(labels_path: &Path) -> Result<()> {
    let upstream = github::fetch_labels(github::W3C_LABELS_URL).await?;
    let local = labels::load_labels(labels_path)?;
    let merged = labels::merge_upstream(local, &upstream)?;
    info!(count = merged.len(), "merged upstream labels");
    persist(labels_path, merged)
}

fn update(labels_path: &Path) -> Result<()> {
    let local = labels::load_labels(labels_path)?;
    persist(labels_path, local)
}

/// Lint, sort, write the labels file, and regenerate the documentation.
/// Lint violations are reported but do not block the write.
fn persist(labels_path: &Path, mut labels: Vec<Label>) -> Result<()> {
    for message in labels::lint(&labels) {
        eprintln!("{}: {message}", "lint".yellow().bold());
    }
    labels::save_labels(labels_path, &mut labels)?;
    std::fs::write(DOCS_FILE, labels::render_docs(&labels))
        .with_context(|| format!("failed to write {DOCS_FILE}"))?;
    println!(
        "{} {} labels written to {}",
        "ok".green().bold(),
        labels.len(),
        labels_path.display()
    );
    Ok(())
}

async fn sync_one(
    labels_path: &Path,
    organization: &str,
    repository: &str,
    token: &str,
) -> Result<()> {
    let local = labels::load_labels(labels_path)?;
    let authority = GitHubAuthority::new(token, organization, repository)?;
    let report = labels::sync_labels(&authority, &local).await?;
    print_report(organization, repository, &report);
    Ok(())
}

async fn sync_all(labels_path: &Path, token: &str) -> Result<()> {
    let repositories = github::discover_repositories(github::WORKSTREAMS_DB_URL).await?;
    if repositories.is_empty() {
        bail!("the workstream database lists no repositories");
    }
    let local = labels::load_labels(labels_path)?;
    for repository in &repositories {
        // A little output per repository, otherwise it is hard to tell
        // what is going on.
        println!("{} whatwg/{repository}", "processing".blue().bold());
        let authority = GitHubAuthority::new(token, "whatwg", repository)?;
        let report = labels::sync_labels(&authority, &local).await?;
        print_report("whatwg", repository, &report);
    }
    Ok(())
}

fn print_report(organization: &str, repository: &str, report: &SyncReport) {
    for message in &report.lint {
        eprintln!("{}: {message}", "lint".yellow().bold());
    }
    for failure in &report.failures {
        eprintln!("{}: {failure}", "error".red().bold());
    }
    println!(
        "{} {organization}/{repository}: {} labels in sync, {} failures",
        "done".green().bold(),
        report.synced,
        report.failures.len()
    );
}
