//! Scenario replay entry point.
//!
//! Loads a scenario (the built-in duel unless `--scenario` is given),
//! replays its activation script and prints the resulting child orders and
//! usage counters.
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dbt_content::{ConfigLoader, ScenarioLoader};
use dbt_core::ResetPolicy;
use dbt_runtime::{RuntimeConfig, ScenarioRunner};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Replay ability activations against dynamic behavior trees
#[derive(Parser, Debug)]
#[command(name = "dbt-sim")]
#[command(about = "Replay usage-triggered behavior tree reordering", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario RON file (defaults to the built-in duel)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Engine configuration TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the reset policy (`at_max` or `past_max`)
    #[arg(long)]
    reset_policy: Option<ResetPolicy>,

    /// Also write logs to `<DIR>/dbt-sim.log`
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_dir.as_deref())?;

    let config = runtime_config(&cli, |key| std::env::var(key).ok())?;
    let scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::load(path)?,
        None => ScenarioLoader::builtin_duel()?,
    };

    let mut runner = ScenarioRunner::install(&scenario, config)
        .context("Failed to install scenario")?;
    let replay = runner.replay(&scenario.activations);

    report::print(&runner, &replay);
    runner.finish();
    Ok(())
}

/// Config file first, then environment, then command line flags.
fn runtime_config<F>(cli: &Cli, env: F) -> Result<RuntimeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let dbt = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => Default::default(),
    };
    let mut config = RuntimeConfig::new(dbt).with_overrides(env);
    if let Some(policy) = cli.reset_policy {
        config.dbt.reset_policy = policy;
    }
    Ok(config)
}

/// Setup logging to stderr and, when a directory is given, to a file.
///
/// The returned guard must stay alive for the file writer to flush.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,dbt=info,runtime=info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "dbt-sim.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/dbt-sim.log", dir.display());
    }
    Ok(guard)
}
