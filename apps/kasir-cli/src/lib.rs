//! # Kasir Console
//!
//! Menu-driven till for ringing up one transaction at a time.
//!
//! ## Module Organization
//! ```text
//! kasir_cli/
//! ├── lib.rs      ◄─── You are here (startup: config, logging, session)
//! ├── cli.rs      ◄─── Command-line flags
//! ├── config.rs   ◄─── ShellConfig (env > TOML > defaults)
//! ├── menu.rs     ◄─── Menu selections
//! ├── render.rs   ◄─── Tables, breakdown and outcome messages
//! └── session.rs  ◄─── Menu loop over any BufRead / Write pair
//! ```
//!
//! ## Output Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout  ◄── menu, prompts, cart tables (what the operator reads)       │
//! │  stderr  ◄── tracing events (RUST_LOG / KASIR_LOG / --verbose)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod menu;
pub mod render;
pub mod session;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::ShellConfig;
use session::Session;

/// Filter used by `--verbose` when `RUST_LOG` is unset.
const VERBOSE_LOG_FILTER: &str = "warn,kasir_cli=debug,kasir_core=debug";

/// Runs the console until the operator quits.
///
/// ## Errors
/// Only setup failures are returned: an unreadable or invalid config file,
/// or a broken stdin/stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ShellConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let filter = if cli.verbose {
        VERBOSE_LOG_FILTER
    } else {
        config.log_filter.as_str()
    };
    init_tracing(filter)?;

    match &config.source {
        Some(path) => info!(path = %path.display(), "configuration loaded"),
        None => info!("using default configuration"),
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(&config, stdin.lock(), stdout.lock());
    session.run().context("terminal I/O failed")?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages from every crate
/// - `RUST_LOG=kasir_cli=trace` - Trace the console only
/// - Default: `fallback` (config `log.filter`, `KASIR_LOG`, or `--verbose`)
fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))
}
