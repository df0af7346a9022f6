//! stockroll CLI - inventory item registry
//!
//! - `serve`: HTTP item list and registration form
//! - `init-db`: create the database schema
//! - `list` / `add`: the same workflow from the terminal

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stockroll_core::StockrollConfig;

mod commands;
mod tracing_setup;

use commands::{AddArgs, DbArgs, ListArgs, ServeArgs};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "stockroll",
    author,
    version,
    about = "Inventory item registry: list stored items and register new ones"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.stockroll/config.toml when present)
    #[arg(long, global = true, env = "STOCKROLL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the item list and registration form over HTTP
    Serve(ServeArgs),
    /// Create the database schema and exit
    InitDb(DbArgs),
    /// Print every registered item
    List(ListArgs),
    /// Register a new item
    Add(AddArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;
    let config = StockrollConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await,
        Commands::InitDb(args) => commands::run_init_db(args, config).await,
        Commands::List(args) => commands::run_list(args, config).await,
        Commands::Add(args) => commands::run_add(args, config).await,
    }
}
