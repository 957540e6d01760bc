//! # Room Rent Desk
//!
//! Operator CLI for registering customers and generating invoices.
//!
//! ## Module Organization
//! ```text
//! roomrent_desk/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Argument definitions
//! ├── config.rs       ◄─── AppConfig: defaults, roomrent.toml, ROOMRENT_*
//! └── commands/
//!     ├── customer.rs ◄─── customer add / list / show
//!     ├── bill.rs     ◄─── bill (build session, write invoice)
//!     └── config.rs   ◄─── config (print effective settings)
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ──► tracing-subscriber, RUST_LOG or default     │
//! │  2. Parse Arguments ─────► clap                                        │
//! │  3. Load Configuration ──► flags > ROOMRENT_* > roomrent.toml > default│
//! │  4. Open Storage ────────► create dirs, load customers.json            │
//! │  5. Run Subcommand                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::AppConfig;
use roomrent_store::Storage;

/// Parses arguments and runs one subcommand.
pub fn run() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), cli.data_dir.clone())?;
    debug!(?config, "Configuration resolved");

    if let Command::Config(cmd) = &cli.command {
        return cmd.run(&config);
    }

    info!(data_dir = %config.data_dir.display(), "Starting Room Rent desk");
    let mut storage = Storage::open(config.store_config())?;
    cli.command.execute(&mut storage, &config)
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=roomrent_store=trace` - Trace storage only
/// - Default: INFO, DEBUG for the roomrent crates
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,roomrent=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
