//! CLI application logic.
//!
//! The standalone runner mirrors the hosted step: the configuration
//! contract is resolved first (fatal before any remote call), the workbook
//! is opened, extraction runs with per-sheet fault isolation, and the
//! results are written as per-sheet `.pipe` files plus a termination log.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridpipe_core::StepConfig;
use gridpipe_data::{extract, ExtractOptions, SheetsAuth, SheetsClient};

use crate::pipes;

/// Environment variable holding an OAuth2 access token
pub const ENV_ACCESS_TOKEN: &str = "GRIDPIPE_ACCESS_TOKEN";
/// Environment variable holding an API key, used when no token is set
pub const ENV_API_KEY: &str = "GRIDPIPE_API_KEY";

#[derive(Parser)]
#[command(name = "gridpipe")]
#[command(version, about = "Extract worksheets from a remote workbook into pipe files", long_about = None)]
struct Cli {
    /// Step configuration document
    #[arg(short, long, default_value = "input/config.json")]
    config: PathBuf,

    /// Directory for per-sheet .pipe files
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Status file consumed by the host orchestrator
    #[arg(long, default_value = "/dev/termination-log")]
    termination_log: PathBuf,
}

/// Entry point for the `gridpipe` binary.
///
/// Returns an error (and thus a non-zero exit status) only for
/// configuration and source-connection failures; per-sheet failures and an
/// empty result still complete successfully.
pub fn run_cli() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    run(&cli.config, &cli.output, &cli.termination_log)
}

fn init_logging() {
    // Diagnostics go to stderr; stdout stays free for pipeline plumbing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(config_path: &Path, output_dir: &Path, termination_log: &Path) -> Result<()> {
    let config = StepConfig::from_path(config_path)
        .with_context(|| format!("Could not read {}", config_path.display()))?;
    let config = ExtractOptions::contract()
        .resolve(config)
        .context("Configuration rejected")?;
    let options = ExtractOptions::from_config(&config)?;

    let auth = auth_from_env()?;
    info!(workbook = %options.workbook_id, "Opening workbook");
    let source = SheetsClient::open(options.workbook_id.clone(), auth)?;

    let extraction = extract(&source, &options)?;
    let written = pipes::write_sheet_pipes(output_dir, &extraction.sheets)?;
    pipes::write_termination_log(termination_log, &written)?;

    info!(
        records = extraction.total_records(),
        sheets = written.len(),
        "Extraction complete"
    );
    Ok(())
}

fn auth_from_env() -> Result<SheetsAuth> {
    if let Ok(token) = std::env::var(ENV_ACCESS_TOKEN) {
        if !token.is_empty() {
            return Ok(SheetsAuth::Bearer(token));
        }
    }
    if let Ok(key) = std::env::var(ENV_API_KEY) {
        if !key.is_empty() {
            return Ok(SheetsAuth::ApiKey(key));
        }
    }
    bail!("No credentials: set {ENV_ACCESS_TOKEN} or {ENV_API_KEY}");
}
