//! TutorConnect CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! tc-cli migrate
//!
//! # Create an admin account
//! tc-cli admin create -e ops@tutorconnect.in -n "Akash" -p <password> --city Kanpur --phone 8181066459
//!
//! # Seed demo data for local development
//! tc-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Apply database migrations
//! - `admin create` - Create admin accounts (registration never can)
//! - `seed` - Seed demo parents, tutors, and requests

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tc-cli")]
#[command(author, version, about = "TutorConnect CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed demo data for local development
    Seed,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin password (min 8 characters)
        #[arg(short, long)]
        password: String,

        /// Admin phone number
        #[arg(long, default_value = "9000000000")]
        phone: String,

        /// Admin city (Kanpur, Lucknow, or Unnao)
        #[arg(long, default_value = "Kanpur")]
        city: String,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
                phone,
                city,
            } => {
                let id =
                    commands::admin::create_user(&email, &name, &password, &phone, &city).await?;
                tracing::info!("Created admin account {id} for {email}");
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
