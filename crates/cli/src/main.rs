//! Review CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run review database migrations
//! review-cli migrate
//!
//! # Create a review for product 1 with a first entry
//! review-cli seed -p 1 -u alice -r "Great product"
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Create a review with one entry

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "review-cli")]
#[command(author, version, about = "Review service CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Create a review for a product, starting at version 1
    Seed {
        /// Product the review belongs to
        #[arg(short, long)]
        product_id: i32,

        /// Author of the first entry
        #[arg(short, long)]
        username: String,

        /// Text of the first entry
        #[arg(short, long)]
        review: String,
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
        Commands::Seed {
            product_id,
            username,
            review,
        } => {
            commands::seed::create_review(product_id, &username, &review).await?;
        }
    }
    Ok(())
}
