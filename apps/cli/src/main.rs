//! # Stockroom Command-Line Application
//!
//! Entry point: parse arguments, open the store, authenticate, dispatch.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (RUST_LOG controls verbosity)
//! 2. Open the database (creates file, runs migrations, seeds admin,
//!    ensures the backup directory)
//! 3. Authenticate the operator (except for the standalone `backup` path)
//! 4. Run the requested command
//! 5. Take one closing backup, mirroring the original end-of-session copy

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stockroom_db::{Database, DbConfig, InventoryService};

mod commands;

#[derive(Parser)]
#[command(
    name = "stockroom",
    version,
    about = "Single-operator inventory manager",
    long_about = "Tracks products, categories and sales in a local SQLite file, \
                  with timestamped backups and spreadsheet/PDF report exports."
)]
struct Cli {
    /// Path of the SQLite database file
    #[arg(long, default_value = "stockroom.db", global = true)]
    database: std::path::PathBuf,

    /// Directory that receives timestamped backups
    #[arg(long, default_value = "backups", global = true)]
    backup_dir: std::path::PathBuf,

    /// Operator username (prompted for when omitted)
    #[arg(short, long, global = true)]
    username: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand)]
    Category(commands::CategoryCommands),

    /// Product management commands
    #[command(subcommand)]
    Product(commands::ProductCommands),

    /// Register a sale: checks stock, decrements it, records the sale
    Sell {
        /// Product name
        product: String,
        /// Units to sell
        quantity: i64,
    },

    /// Sales report over a date range, optionally exported
    Report {
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: String,
        /// Also write the report as a spreadsheet
        #[arg(long, value_name = "FILE")]
        xlsx: Option<std::path::PathBuf>,
        /// Also write the report as a PDF text dump
        #[arg(long, value_name = "FILE")]
        pdf: Option<std::path::PathBuf>,
    },

    /// Copy the database to a timestamped backup file and exit
    Backup,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = DbConfig::new(&cli.database).backup_dir(&cli.backup_dir);
    let db = Database::new(config).await?;
    let mut service = InventoryService::new(db);

    // The standalone backup path exists solely to take a copy; it does not
    // open an operator session and takes no second backup afterwards.
    let interactive = !matches!(cli.command, Commands::Backup);

    if interactive {
        commands::authenticate(&mut service, cli.username.clone()).await?;
    }

    let mut outcome = dispatch(&service, cli.command).await;

    if interactive {
        // Backup failure is a real error, but it must not mask whatever the
        // command itself reported.
        match service.backup().await {
            Ok(written) => info!(path = %written.display(), "Closing backup written"),
            Err(err) if outcome.is_ok() => outcome = Err(err.into()),
            Err(err) => warn!(error = %err, "Closing backup failed"),
        }
    }

    service.database().close().await;
    outcome
}

async fn dispatch(service: &InventoryService, command: Commands) -> Result<()> {
    match command {
        Commands::Category(cmd) => commands::handle_category_command(service, cmd).await,
        Commands::Product(cmd) => commands::handle_product_command(service, cmd).await,
        Commands::Sell { product, quantity } => {
            commands::handle_sell(service, &product, quantity).await
        }
        Commands::Report {
            from,
            to,
            xlsx,
            pdf,
        } => commands::handle_report(service, &from, &to, xlsx.as_deref(), pdf.as_deref()).await,
        Commands::Backup => {
            let written = service.backup().await?;
            println!("Backup written to {}", written.display());
            Ok(())
        }
    }
}
