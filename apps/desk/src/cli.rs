//! CLI argument definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use roomrent_store::Storage;

use crate::commands::{BillCmd, ConfigCmd, CustomerCmd};
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "roomrent")]
#[command(about = "Room Rent - customer register and invoices for the front desk")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: roomrent.toml in the data directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides ROOMRENT_DATA_DIR and the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register, list and look up customers
    #[command(subcommand)]
    Customer(CustomerCmd),

    /// Build a bill for a customer and write the invoice
    Bill(BillCmd),

    /// Show the effective configuration
    Config(ConfigCmd),
}

impl Command {
    pub fn execute(&self, storage: &mut Storage, config: &AppConfig) -> Result<()> {
        match self {
            Command::Customer(cmd) => cmd.run(storage),
            Command::Bill(cmd) => cmd.run(storage, config),
            Command::Config(cmd) => cmd.run(config),
        }
    }
}
