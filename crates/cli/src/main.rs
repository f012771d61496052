//! Hielitos CLI - database migrations, seeding and ledger reports.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! hielitos-cli migrate
//!
//! # Load recipes, orders, sales and cash movements from YAML
//! hielitos-cli seed fixtures/seed.yaml
//!
//! # Overall balance plus the monthly series
//! hielitos-cli balance --period month
//!
//! # Ten best-selling recipes by revenue
//! hielitos-cli top-recipes
//! ```
//!
//! Every command reads `DATABASE_URL` (a `.env` file is honoured).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use hielitos_core::PeriodGranularity;

mod commands;

#[derive(Parser)]
#[command(name = "hielitos-cli")]
#[command(author, version, about = "Hielitos CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the store from a YAML file
    Seed {
        /// Path to the seed file
        file: String,
    },
    /// Show the overall balance and the per-period series
    Balance {
        /// Period granularity (`day`, `week`, `month`, `year`)
        #[arg(short, long, default_value = "month")]
        period: PeriodGranularity,
    },
    /// Show the top recipes by revenue
    TopRecipes,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::run(&file).await?,
        Commands::Balance { period } => commands::ledger::balance(period).await?,
        Commands::TopRecipes => commands::ledger::top_recipes().await?,
    }
    Ok(())
}
