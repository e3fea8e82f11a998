//! # mediashop-quote
//!
//! Prices a cart snapshot with the shared pricing engine.
//!
//! ## Usage
//! ```text
//! mediashop-quote quote --cart cart.json --rush --city "Hà Nội"
//! mediashop-quote rush-check --cart - --city Hanoi < cart.json
//! mediashop-quote config
//! ```
//!
//! Results go to stdout as JSON; logs go to stderr. A rejected quote prints
//! the error payload and exits with status 2.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mediashop_quote::commands;
use mediashop_quote::config::QuoteSettings;

/// Exit status for a quote the pricing rules rejected.
const EXIT_REJECTED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "mediashop-quote", version, about = "Price media shop orders")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the full price breakdown for a cart
    Quote {
        /// Cart snapshot (JSON array of line items), or `-` for stdin
        #[arg(long)]
        cart: String,

        /// Request rush delivery
        #[arg(long)]
        rush: bool,

        /// Shipping city
        #[arg(long)]
        city: Option<String>,
    },

    /// Check whether a cart can be rushed to a city
    RushCheck {
        /// Cart snapshot (JSON array of line items), or `-` for stdin
        #[arg(long)]
        cart: String,

        /// Shipping city
        #[arg(long)]
        city: String,
    },

    /// Print the effective pricing configuration
    Config,
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let settings = QuoteSettings::load()?;
    info!(
        free_shipping_threshold = %settings.pricing.free_shipping_threshold(),
        tax_rate = %settings.pricing.tax_rate().percentage(),
        "Configuration loaded"
    );

    match cli.command {
        Command::Quote { cart, rush, city } => {
            let items = commands::load_cart(&cart)?;
            match commands::quote(&items, &settings, rush, city.as_deref()) {
                Ok(breakdown) => print_json(&breakdown)?,
                Err(err) => {
                    print_json(&err)?;
                    return Ok(ExitCode::from(EXIT_REJECTED));
                }
            }
        }
        Command::RushCheck { cart, city } => {
            let items = commands::load_cart(&cart)?;
            print_json(&commands::rush_check(&items, &city))?;
        }
        Command::Config => print_json(&settings)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=mediashop_quote=trace` - Show trace for this binary only
/// - Default: INFO, DEBUG for this binary
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mediashop_quote=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
