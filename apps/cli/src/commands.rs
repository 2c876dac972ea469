//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::OnceLock;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use wikisync_core::{SyncAborted, SyncContext, SyncReport, SyncRequest, run_sync};
use wikisync_shared::{
    AppConfig, ProgressReporter, SyncEvent, WikiSyncError, config_file_path, init_config,
    init_config_at, load_config, load_config_from,
};
use wikisync_storage::Store;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// wikisync: keep a local copy of a rules wiki in sync.
#[derive(Parser)]
#[command(
    name = "wikisync",
    version,
    about = "Mirror a rules wiki into a local knowledge base, fetching only what is missing.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.wikisync/wikisync.toml).
    #[arg(long, global = true, env = "WIKISYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Knowledge-base file (overrides [sync].data_file).
    #[arg(long, global = true, env = "WIKISYNC_DATA")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch entries missing from the local knowledge base.
    Update {
        /// Topic to sync (all topics if omitted).
        topic: Option<String>,

        /// Ignore cached entries and re-fetch the selected topic(s).
        #[arg(short, long)]
        force: bool,

        /// Fetch with the higher concurrency cap.
        #[arg(short = 's', long)]
        fast: bool,
    },

    /// List configured topics with their local entry counts.
    Topics,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "wikisync=info",
        1 => "wikisync=debug",
        _ => "wikisync=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.as_deref();
    let data = cli.data.as_deref();

    match cli.command {
        Command::Update { topic, force, fast } => {
            let request = SyncRequest { topic, force, fast };
            cmd_update(load_app_config(config_path, data)?, request).await
        }
        Command::Topics => {
            cmd_topics(load_app_config(config_path, data)?).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { action } => {
            match action {
                ConfigAction::Init => cmd_config_init(config_path)?,
                ConfigAction::Show => cmd_config_show(load_app_config(config_path, data)?)?,
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the config file (or defaults) and apply the `--data` override.
fn load_app_config(path: Option<&Path>, data: Option<&Path>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(data) = data {
        config.sync.data_file = Some(data.to_path_buf());
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_update(config: AppConfig, request: SyncRequest) -> Result<ExitCode> {
    info!(topic = ?request.topic, force = request.force, fast = request.fast, "updating knowledge base");

    let ctx = SyncContext::new(config, request)?;
    let reporter = CliProgress::new();

    let result = run_sync(&ctx, &reporter).await;
    reporter.clear();

    match result {
        Ok(report) => {
            print_summary(&report, ctx.store.path());
            Ok(ExitCode::SUCCESS)
        }
        Err(aborted) => aborted_exit(aborted),
    }
}

/// Exit code for an aborted run.
///
/// Unknown topics and an unreachable host were already rendered from their
/// events, so they exit non-zero without a second report.
fn aborted_exit(aborted: SyncAborted) -> Result<ExitCode> {
    match aborted.source {
        WikiSyncError::UnknownTopic { .. } | WikiSyncError::Connectivity { .. } => {
            Ok(ExitCode::FAILURE)
        }
        _ => Err(aborted.into()),
    }
}

fn print_summary(report: &SyncReport, data_file: &Path) {
    println!();
    if report.is_up_to_date() {
        println!("  Knowledge base is up to date.");
    } else {
        println!("  Knowledge base updated!");
        println!("  Topics:  {}", report.topics.join(", "));
        println!("  New:     {}", report.state.total_fetched);
        if report.failed > 0 {
            println!("  Failed:  {} (retried on the next update)", report.failed);
        }
    }
    println!("  File:    {}", data_file.display());
    println!("  Time:    {:.1}s", report.elapsed.as_secs_f64());
    println!();
}

async fn cmd_topics(config: AppConfig) -> Result<()> {
    let store = Store::new(config.data_file()?);
    let kb = store.load().await?;

    println!();
    for topic in &config.topics {
        println!(
            "  {:<16} {:>5} entries   ({})",
            topic.name,
            kb.entry_count(&topic.name),
            topic.sources.join(", ")
        );
    }
    println!();
    Ok(())
}

fn cmd_config_init(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => {
            init_config_at(path)?;
            path.to_path_buf()
        }
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: AppConfig) -> Result<()> {
    if let Ok(path) = config_file_path() {
        println!("# default location: {}", path.display());
    }
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter: a spinner while indexes are scanned, a bar while
/// entries are fetched.
struct CliProgress {
    spinner: ProgressBar,
    bar: OnceLock<ProgressBar>,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.set_message("Checking connection...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self {
            spinner,
            bar: OnceLock::new(),
        }
    }

    fn fetch_bar(&self, total: usize) -> &ProgressBar {
        self.bar.get_or_init(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::with_template("  [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );
            bar
        })
    }

    fn clear(&self) {
        self.spinner.finish_and_clear();
        if let Some(bar) = self.bar.get() {
            bar.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn report(&self, event: &SyncEvent) {
        match event {
            SyncEvent::UnknownTopic {
                requested,
                available,
            } => {
                self.spinner.finish_and_clear();
                eprintln!("Unknown topic '{requested}'. Available topics:");
                for name in available {
                    eprintln!("  - {name}");
                }
                eprintln!();
                eprintln!("  (wikisync update [topic] [-f, --force])");
            }
            SyncEvent::Connectivity { host } => {
                self.spinner.finish_and_clear();
                eprintln!("Cannot reach {host}. Check your internet connection.");
            }
            SyncEvent::DiscoveryProgress { newly_found, .. } => {
                let percent = event.discovery_percent().unwrap_or(0);
                self.spinner
                    .set_message(format!("Scanning indexes {percent}% ({newly_found} new)"));
            }
            SyncEvent::DiscoveryComplete { total_new } => {
                self.spinner.finish_and_clear();
                if *total_new > 0 {
                    println!("  {total_new} new entries found");
                }
            }
            SyncEvent::FetchProgress {
                topic,
                name,
                completed,
                total,
            } => {
                let bar = self.fetch_bar(*total);
                bar.set_position(*completed as u64);
                bar.set_message(format!("{topic}: {name}"));
            }
            SyncEvent::SyncComplete { .. } | SyncEvent::SyncUpToDate => {
                if let Some(bar) = self.bar.get() {
                    bar.finish_and_clear();
                }
            }
        }
    }
}
