//! Little Wonders CLI - Database migrations and studio operations.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! lw-cli migrate
//!
//! # Seed the database with demo bookings
//! lw-cli seed
//!
//! # Confirm a pending booking (clients can then order an album for it)
//! lw-cli booking confirm -i 6b8f0f9e-5f2c-4e0e-9d7a-1c2b3d4e5f60
//!
//! # Cancel a booking (its dates drop off the booked-dates feed)
//! lw-cli booking cancel -i 6b8f0f9e-5f2c-4e0e-9d7a-1c2b3d4e5f60
//!
//! # Move an order through its lifecycle
//! lw-cli order status -i 0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9 -s processing
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with demo bookings
//! - `booking confirm|cancel` - Administrative booking status transitions
//! - `order status` - Administrative order status transitions

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lw-cli")]
#[command(author, version, about = "Little Wonders CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with demo bookings
    Seed,
    /// Manage bookings
    Booking {
        #[command(subcommand)]
        action: BookingAction,
    },
    /// Manage digital album orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum BookingAction {
    /// Confirm a pending booking
    Confirm {
        /// Booking ID
        #[arg(short, long)]
        id: String,
    },
    /// Cancel a booking
    Cancel {
        /// Booking ID
        #[arg(short, long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Set an order's status
    Status {
        /// Order ID
        #[arg(short, long)]
        id: String,

        /// New status (`pending`, `confirmed`, `processing`, `completed`, `cancelled`)
        #[arg(short, long)]
        status: String,
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
        Commands::Seed => commands::seed::run().await?,
        Commands::Booking { action } => match action {
            BookingAction::Confirm { id } => {
                commands::booking::set_status(&id, little_wonders_core::BookingStatus::Confirmed)
                    .await?;
            }
            BookingAction::Cancel { id } => {
                commands::booking::set_status(&id, little_wonders_core::BookingStatus::Cancelled)
                    .await?;
            }
        },
        Commands::Order { action } => match action {
            OrderAction::Status { id, status } => {
                commands::order::set_status(&id, &status).await?;
            }
        },
    }
    Ok(())
}
