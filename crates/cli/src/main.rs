//! RideGear CLI - seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the demo catalog into the data directory
//! rg-cli seed --file seed/catalog.yaml
//!
//! # Wipe catalog stores first, then seed
//! rg-cli seed --clear
//!
//! # Create an admin user (the only path that mints admins)
//! rg-cli admin create -e admin@example.com -n "Admin Name"
//!
//! # Show per-store record counts
//! rg-cli stats
//! ```
//!
//! All commands take `--data-dir`; the default comes from `RIDEGEAR_DATA_DIR`
//! or falls back to `.ridegear-data`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

/// Resolve the data directory flag against the environment default.
fn default_data_dir() -> String {
    std::env::var("RIDEGEAR_DATA_DIR").unwrap_or_else(|_| ".ridegear-data".to_string())
}

#[derive(Parser)]
#[command(name = "rg-cli")]
#[command(author, version, about = "RideGear CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store with catalog data from a YAML file
    Seed {
        /// Path to the seed YAML file
        #[arg(short, long, default_value = "seed/catalog.yaml")]
        file: String,

        /// Data directory for the file-backed store
        #[arg(long, default_value_t = default_data_dir())]
        data_dir: String,

        /// Clear the catalog stores before seeding
        #[arg(long)]
        clear: bool,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Show per-store record counts
    Stats {
        /// Data directory for the file-backed store
        #[arg(long, default_value_t = default_data_dir())]
        data_dir: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Data directory for the file-backed store
        #[arg(long, default_value_t = default_data_dir())]
        data_dir: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
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
        Commands::Seed {
            file,
            data_dir,
            clear,
        } => commands::seed::run(&file, &data_dir, clear).await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                data_dir,
            } => commands::admin::create_user(&email, &name, &data_dir).await?,
        },
        Commands::Stats { data_dir } => commands::stats::run(&data_dir).await?,
    }
    Ok(())
}
