//! Status Rotator - rotates account custom statuses from editable presets
//!
//! This binary starts the rotation loop on the main thread and, unless
//! disabled, the configuration web server on a background thread.
//!
//! # Usage
//!
//! ```bash
//! # Rotate using ./configuration and serve the editor API on port 8080
//! status-rotator
//!
//! # Rotation only, custom configuration directory
//! status-rotator --no-web --config-dir /etc/status-rotator
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use status_rotator::config::ConfigStore;
use status_rotator::constants::{APP_BINARY_NAME, APP_NAME, DEFAULT_CONFIG_DIR, NO_WEB_ENV_VAR};
use status_rotator::rotation::{RotationEngine, ThreadSleeper};
use status_rotator::services::{AccountPublisher, HttpStatusClient, LiveVariables};

/// Status Rotator - rotates account custom statuses from editable presets
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Directory containing settings.json, presets.json, and statuses.json
    #[arg(short, long, default_value = DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,

    /// Disable the configuration web server
    #[arg(long)]
    no_web: bool,

    /// Port for the configuration web server
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host for the configuration web server
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory with the static editor frontend
    #[arg(long, value_name = "DIR")]
    static_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Parses a boolean environment value (`1/0`, `true/false`, `t/f`, `yes/no`).
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" => Some(true),
        "0" | "f" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// `--no-web`, overridden by a parseable `NO_WEB` environment value.
fn web_disabled(flag: bool) -> bool {
    std::env::var(NO_WEB_ENV_VAR)
        .ok()
        .and_then(|value| parse_bool(&value))
        .unwrap_or(flag)
}

#[cfg(feature = "web")]
fn spawn_web_server(cli: &Cli, store: ConfigStore) -> Result<()> {
    use anyhow::Context;
    use std::net::SocketAddr;

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .context("Invalid web server address")?;
    let static_dir = cli.static_dir.clone();

    std::thread::Builder::new()
        .name("config-web".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to start web runtime: {e}");
                    return;
                }
            };

            if let Err(e) = runtime.block_on(status_rotator::web::run_server(store, static_dir, addr)) {
                error!("Web server error: {e:#}");
            }
        })
        .context("Failed to spawn web server thread")?;

    Ok(())
}

#[cfg(not(feature = "web"))]
fn spawn_web_server(_cli: &Cli, _store: ConfigStore) -> Result<()> {
    info!("Built without the web feature; configuration web server unavailable");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Existing environment variables take precedence over .env
    let _ = dotenvy::dotenv();

    info!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let store = ConfigStore::new(&cli.config_dir);

    if web_disabled(cli.no_web) {
        info!("Web server disabled");
    } else if let Err(e) = spawn_web_server(&cli, store.clone()) {
        error!("{e:#}");
    }

    let publisher = AccountPublisher::from_env(HttpStatusClient::new());
    let mut engine =
        match RotationEngine::start(store, publisher, LiveVariables::new(), ThreadSleeper) {
            Ok(engine) => engine,
            Err(e) => {
                error!("{e:#}");
                return Err(e);
            }
        };

    engine.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("f"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["status-rotator"]);
        assert_eq!(cli.config_dir, PathBuf::from(DEFAULT_CONFIG_DIR));
        assert_eq!(cli.port, 8080);
        assert!(!cli.no_web);
        assert!(cli.static_dir.is_none());
    }
}
