//! timereport - project time-tracking report aggregator
//!
//! A CLI tool that fetches per-member time-tracking report pages, aggregates
//! logged hours for a reporting period, and prints a project status report
//! as plain text or an HTML table.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any argument, config, fetch, or parse error

mod analysis;
mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod output;
mod report;

use analysis::aggregate_lines;
use anyhow::{Context, Result};
use cli::Args;
use config::{Config, MemberInfo, ProjectInfo};
use fetch::ReportClient;
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use models::{DateWindow, MemberTotals, ProjectTotals};
use output::{generate_breakdown_report, generate_status_report, TableFormat};
use report::extract_report_lines;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("timereport v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Build the report
    match run_report(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Report failed: {}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .timereport.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".timereport.toml");

    if path.exists() {
        eprintln!(".timereport.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .timereport.toml")?;

    println!("Created .timereport.toml with default settings.");
    println!("Edit it to customize the project file, timeout, and concurrency.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr; stdout carries only the rendered report.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete report workflow.
async fn run_report(args: Args) -> Result<()> {
    // Reporting period
    let window = args.window()?;

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Load the project info document
    let project_path = std::path::PathBuf::from(&config.general.project_file);
    let project = ProjectInfo::load(&project_path)?;
    info!(
        "Project '{}': {} members, period {}",
        project.project_name,
        project.members.len(),
        window
    );

    // Fetch and aggregate every member's report, bounded concurrency.
    // buffered() keeps member order, so totals and rendering stay
    // deterministic regardless of response timing.
    let client = ReportClient::new(&config.fetch)?;
    let progress = make_progress(&args, project.members.len() as u64);

    let members: Vec<MemberTotals> = stream::iter(&project.members)
        .map(|member| {
            let client = &client;
            let window = &window;
            let progress = progress.clone();
            async move {
                let totals = collect_member(client, member, window).await.with_context(|| {
                    format!(
                        "Failed to aggregate report for member '{}'",
                        member.member_name
                    )
                });
                if let Some(ref pb) = progress {
                    pb.inc(1);
                }
                totals
            }
        })
        .buffered(config.general.concurrency.max(1))
        .try_collect()
        .await?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    // Merge project-wide totals after all members completed
    let mut project_totals = ProjectTotals::default();
    for member in &members {
        project_totals.merge(member);
    }
    info!(
        "Aggregated {} hours across {} members",
        models::format_hours(project_totals.total_hours),
        members.len()
    );

    // Render to stdout
    let output = if args.breakdown {
        generate_breakdown_report(&members, &project_totals)
    } else {
        let format = if args.table {
            TableFormat::Html
        } else {
            TableFormat::Plain
        };
        generate_status_report(&project.project_name, &window, &members, format)
    };
    println!("{}", output);

    Ok(())
}

/// Fetch, extract, and aggregate one member's report.
async fn collect_member(
    client: &ReportClient,
    member: &MemberInfo,
    window: &DateWindow,
) -> Result<MemberTotals> {
    let body = client.fetch_report(&member.report_url).await?;
    let lines = extract_report_lines(&body)?;
    debug!("{}: {} report lines", member.member_name, lines.len());

    let totals = aggregate_lines(lines.iter().map(String::as_str), window)?;

    Ok(MemberTotals::from_totals(
        member.member_name.clone(),
        member.report_url.clone(),
        totals,
    ))
}

/// Progress bar over the member list, suppressed in quiet mode.
fn make_progress(args: &Args, members: u64) -> Option<ProgressBar> {
    if args.quiet {
        return None;
    }

    let pb = ProgressBar::new(members);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    Some(pb)
}

/// Load settings from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .timereport.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
