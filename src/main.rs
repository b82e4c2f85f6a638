//! lamco-gesture-replay
//!
//! Replays a gesture script against an in-memory target and prints the
//! resulting event stream as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use lamco_synthetic_gesture::config::Config;
use lamco_synthetic_gesture::replay::{self, GestureScript};
use lamco_synthetic_gesture::utils::format_user_error;

/// Command-line arguments for lamco-gesture-replay
#[derive(Parser, Debug)]
#[command(name = "lamco-gesture-replay")]
#[command(version, about = "Synthetic gesture replay", long_about = None)]
pub struct Args {
    /// Configuration file path (defaults are used when absent)
    #[arg(short, long, env = "LAMCO_GESTURE_CONFIG")]
    pub config: Option<String>,

    /// Gesture script to replay
    #[arg(short, long, env = "LAMCO_GESTURE_SCRIPT")]
    pub script: PathBuf,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Directory for daily log files (overrides logging.log_dir)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", format_user_error(&e));
                return Err(e);
            }
        },
        None => Config::default_config(),
    };

    let _log_guard = init_logging(&args, &config)?;

    info!("════════════════════════════════════════════════════════");
    info!("  lamco-gesture-replay v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {}", env!("BUILD_DATE"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("════════════════════════════════════════════════════════");
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = replay_script(&args, &config) {
        eprintln!("{}", format_user_error(&e));
        return Err(e);
    }
    Ok(())
}

fn replay_script(args: &Args, config: &Config) -> Result<()> {
    let script = GestureScript::load(&args.script).context("Failed to load gestures")?;
    let params = script
        .to_params(&config.defaults)
        .context("Failed to load gestures")?;

    let report = replay::run(params, config)?;
    if !report.all_finished() {
        warn!("Some gestures did not finish; see the report for details");
    }

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

fn format_layer<W>(format: &str, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);
    match format {
        "json" => layer.json().boxed(),
        "compact" => layer.compact().boxed(),
        _ => layer.pretty().boxed(),
    }
}

fn init_logging(args: &Args, config: &Config) -> Result<Option<WorkerGuard>> {
    let log_level = match args.verbose {
        0 => config.logging.level.to_lowercase(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "lamco_synthetic_gesture={level},lamco_gesture_replay={level},warn",
            level = log_level
        ))
    });

    // Reports go to stdout, so logs stay on stderr
    let mut layers = vec![format_layer(&args.log_format, std::io::stderr, true)];

    let log_dir = args.log_dir.as_ref().or(config.logging.log_dir.as_ref());
    let guard = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "lamco-gesture-replay.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(format_layer(&args.log_format, writer, false));
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();

    if let Some(dir) = log_dir {
        info!("Logging to directory: {}", dir.display());
    }
    Ok(guard)
}
