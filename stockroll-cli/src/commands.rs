use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use stockroll_core::{ItemForm, NewItem, StockrollConfig};
use stockroll_server::{registry, run_server, CreateOutcome, ServerConfig, Store};

#[derive(Parser, Debug)]
pub struct DbArgs {
    /// SQLite database file (overrides config)
    #[arg(long)]
    pub database: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to (overrides config)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    #[command(flatten)]
    pub db: DbArgs,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Print items as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Display name of the item
    #[arg(long)]
    pub name: String,

    /// Unit of measure (e.g. box, kg)
    #[arg(long)]
    pub unit: String,

    /// Reorder threshold (default: 0)
    #[arg(long)]
    pub min_stock: Option<String>,

    #[command(flatten)]
    pub db: DbArgs,
}

impl DbArgs {
    fn resolve(&self, config: &StockrollConfig) -> PathBuf {
        self.database.clone().unwrap_or_else(|| config.database.clone())
    }
}

async fn open_store(path: PathBuf) -> Result<Store> {
    Store::open(&path)
        .await
        .with_context(|| format!("failed to open database at {}", path.display()))
}

pub async fn run_serve(args: ServeArgs, config: StockrollConfig) -> Result<()> {
    let store = open_store(args.db.resolve(&config)).await?;
    let server = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.server.bind),
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
    };

    run_server(store, server).await.context("server error")?;
    Ok(())
}

pub async fn run_init_db(args: DbArgs, config: StockrollConfig) -> Result<()> {
    let path = args.resolve(&config);
    open_store(path.clone()).await?;
    println!("Schema ready at {}", path.display());
    Ok(())
}

pub async fn run_list(args: ListArgs, config: StockrollConfig) -> Result<()> {
    let store = open_store(args.db.resolve(&config)).await?;
    let items = store
        .scoped(|db| Box::pin(registry::list_items(db)))
        .await
        .context("failed to list items")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No items registered.");
        return Ok(());
    }

    for item in items {
        println!(
            "{:>5}  {:<30} {:<10} min {}",
            item.id, item.item_name, item.unit, item.min_stock
        );
    }
    Ok(())
}

pub async fn run_add(args: AddArgs, config: StockrollConfig) -> Result<()> {
    let store = open_store(args.db.resolve(&config)).await?;
    let item = NewItem::from(ItemForm {
        item_name: args.name,
        unit: args.unit,
        min_stock: args.min_stock,
    });

    let outcome = store
        .scoped(move |db| Box::pin(registry::create_item(db, item)))
        .await
        .context("failed to register item")?;

    match outcome {
        CreateOutcome::Created(item) => {
            println!("Registered #{} {} ({})", item.id, item.item_name, item.unit);
            Ok(())
        }
        CreateOutcome::Rejected { message, .. } => bail!(message),
    }
}
