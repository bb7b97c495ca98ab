//! Nexus CLI - portal tooling outside the web server.
//!
//! # Usage
//!
//! ```bash
//! # Draft a product description with the configured Gemini model
//! nexus-cli describe --name "Quantum Mouse" --category Peripherals
//!
//! # Print the launch catalog as JSON
//! nexus-cli catalog
//! ```
//!
//! # Commands
//!
//! - `describe` - Generate a product description (same fallbacks as the portal)
//! - `catalog` - Export the seed catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nexus-cli")]
#[command(author, version, about = "Nexus portal CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a marketing description for a product
    Describe {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Product category
        #[arg(short, long, default_value = "Electronics")]
        category: String,
    },
    /// Print the seed catalog as JSON
    Catalog {
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Describe { name, category } => {
            commands::describe::run(&name, &category).await?;
        }
        Commands::Catalog { compact } => commands::catalog::run(compact)?,
    }
    Ok(())
}
