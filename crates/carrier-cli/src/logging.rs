use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Initialize process-wide logging. Called exactly once, before any command
/// runs; nothing else may reconfigure the subscriber afterwards.
///
/// Error-level events are appended to a per-run log file under
/// `<cwd>/logs/`, named with the start timestamp
/// (`errorLog_<HHMMddmmyyyy>.txt`). The file is created immediately, so a
/// run that dies during setup still leaves a log behind. With `verbose`,
/// debug-level diagnostics additionally go to the console.
///
/// Returns the log file path so commands can point the operator at it.
pub fn init(verbose: bool) -> Result<PathBuf> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_name = chrono::Local::now()
        .format("errorLog_%H%M%d%m%Y.txt")
        .to_string();
    let log_path = log_dir.join(file_name);

    let log_file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(log_file))
        .with_filter(LevelFilter::ERROR);

    if verbose {
        let console_layer = fmt::layer()
            .with_target(false)
            .without_time()
            .with_filter(EnvFilter::new(
                "carrier_cli=debug,carrier_core=debug,carrier_browser=debug",
            ));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer)
            .init();
    } else {
        tracing_subscriber::registry().with(file_layer).init();
    }

    Ok(log_path)
}
