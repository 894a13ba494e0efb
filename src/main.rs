//! Entry point for the translation sync command.

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::Parser;
use rosey_sync::Orchestrator;
use rosey_sync::config::ConfigManager;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "rosey-sync", version, about = "Synchronize translation working files")]
struct Cli {
    /// Configuration file
    #[arg(long, default_value_os_t = ConfigManager::default_config_path())]
    config: PathBuf,

    /// Only sync these locales (repeatable)
    #[arg(long = "locale")]
    locales: Vec<String>,

    /// Also write logs to `<dir>/rosey-sync.log`
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

/// Exit code for configuration and inventory errors.
const EXIT_SETUP_FAILURE: u8 = 2;

/// Installs the global subscriber; the returned guard flushes the log file.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, "rosey-sync.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Some(guard)
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref());

    let mut config_manager = ConfigManager::new();
    let loaded = config_manager
        .load_settings(&cli.config)
        .and_then(|()| config_manager.restrict_locales(&cli.locales));
    if let Err(error) = loaded {
        tracing::error!(config = %cli.config.display(), %error, "Invalid configuration");
        return ExitCode::from(EXIT_SETUP_FAILURE);
    }

    let orchestrator = match Orchestrator::new(config_manager.get_settings().clone()) {
        Ok(orchestrator) => orchestrator,
        Err(error) => {
            tracing::error!(%error, "Invalid configuration");
            return ExitCode::from(EXIT_SETUP_FAILURE);
        }
    };

    match orchestrator.run().await {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            for (locale, error) in report.failures() {
                tracing::error!(%locale, %error, "Locale was not synchronized");
            }
            ExitCode::FAILURE
        }
        Err(error) => {
            tracing::error!(%error, "Sync aborted");
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}
