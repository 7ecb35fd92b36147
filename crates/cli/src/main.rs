//! Driftwood Home CLI - schema export and catalog inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Print the product schema as studio-ready JSON
//! dw-cli schema print --pretty
//!
//! # List every product in the dataset
//! dw-cli catalog list
//!
//! # Show one product in full
//! dw-cli catalog show prod-armchair
//! ```
//!
//! # Commands
//!
//! - `schema print` - Export the content schema definition
//! - `catalog list` - List products from the configured dataset
//! - `catalog show` - Show a single product by document id

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dw-cli")]
#[command(author, version, about = "Driftwood Home CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the content schema
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum SchemaAction {
    /// Print the product schema as JSON
    Print {
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every product in the dataset
    List,
    /// Show a single product by document id
    Show {
        /// Product document id (e.g. prod-armchair)
        id: String,
    },
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
        Commands::Schema { action } => match action {
            SchemaAction::Print { pretty } => commands::schema::print(pretty)?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list().await?,
            CatalogAction::Show { id } => commands::catalog::show(&id).await?,
        },
    }
    Ok(())
}
