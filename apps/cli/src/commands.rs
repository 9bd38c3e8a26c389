//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use examplecatalog_core::pipeline::{GenerateReport, ProgressReporter, generate};
use examplecatalog_shared::{
    AppConfig, CONFIG_FILE_NAME, GenerateConfig, init_config, load_config,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// examplecatalog — index a directory of documentation examples.
#[derive(Parser)]
#[command(
    name = "examplecatalog",
    version,
    about = "Generate category listings, a main index and a searchable JSON catalog for documentation examples.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./examplecatalog.toml if present).
    #[arg(long, global = true, env = "EXAMPLECATALOG_CONFIG")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
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
    /// Regenerate listings and the catalog (the default).
    Generate {
        /// Examples root directory (overrides the config file).
        #[arg(long)]
        root: Option<PathBuf>,
    },

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
    /// Write a config file with the defaults.
    Init {
        /// Where to write it.
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        path: PathBuf,
    },
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = [
        "examplecatalog",
        "examplecatalog_core",
        "examplecatalog_shared",
        "examplecatalog_markdown",
    ]
    .map(|target| format!("{target}={level}"))
    .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
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
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_file.as_deref();
    match cli.command {
        None => cmd_generate(config_path, None),
        Some(Command::Generate { root }) => cmd_generate(config_path, root),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init { path } => cmd_config_init(&path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn cmd_generate(config_path: Option<&Path>, root: Option<PathBuf>) -> Result<()> {
    let app_config = load_config(config_path)?;
    let mut config = GenerateConfig::from(&app_config);
    if let Some(root) = root {
        config = config.with_root(root);
    }

    let cwd =
        std::env::current_dir().map_err(|e| eyre!("cannot determine working directory: {e}"))?;
    info!(
        cwd = %cwd.display(),
        root = %config.root.display(),
        catalog = %config.catalog_path().display(),
        "starting index generation"
    );

    let reporter = CliProgress::new();
    let report = generate(&config, chrono::Utc::now(), &reporter)?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &GenerateReport) {
    println!();
    println!("  Index generation complete. Found {} examples.", report.total);
    for (category, count) in &report.category_counts {
        println!("    {category:<24} {count}");
    }
    println!("  Catalog: {}", report.catalog_path.display());
    if !report.main_listing_updated {
        println!("  Main index: not found, skipped");
    }

    if !report.diagnostics.is_empty() {
        println!();
        println!("  Warnings ({}):", report.diagnostics.len());
        for diagnostic in &report.diagnostics {
            println!(
                "    [{}] {}: {}",
                diagnostic.kind,
                diagnostic.path.display(),
                diagnostic.message
            );
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn category_done(&self, category: &str, count: usize) {
        self.spinner
            .println(format!("  Updated index for category: {category} ({count})"));
    }

    fn done(&self, _report: &GenerateReport) {
        self.spinner.finish_and_clear();
    }
}

// Clears the spinner when `generate` bails out before `done`.
impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

fn cmd_config_init(path: &Path) -> Result<()> {
    init_config(path)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config: AppConfig = load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_cleared_when_progress_dropped_early() {
        let progress = CliProgress::new();
        progress.phase("Collecting remediation");
        let spinner = progress.spinner.clone();
        assert!(!spinner.is_finished());

        drop(progress);
        assert!(spinner.is_finished());
    }

    #[test]
    fn spinner_cleared_on_failed_generate() {
        let root = std::env::temp_dir()
            .join(format!("ec-cli-test-{}", std::process::id()))
            .join("missing-root");
        let config = GenerateConfig::from(&AppConfig::default()).with_root(&root);

        let progress = CliProgress::new();
        let spinner = progress.spinner.clone();
        let result = (|| -> Result<GenerateReport> {
            let report = generate(&config, chrono::Utc::now(), &progress)?;
            Ok(report)
        })();
        assert!(result.is_err());

        drop(progress);
        assert!(spinner.is_finished());
    }
}
