//! Tech Bazaar CLI - browse the catalog, build checkout links, run a demo session.
//!
//! # Usage
//!
//! ```bash
//! # List sale items in the audio category
//! tb-cli catalog --category Audio --filter Sale
//!
//! # Build the chat link for an order
//! tb-cli checkout --item 4x2 --item 7 --phone 55501000 \
//!     --pickup-name "Ana Pérez" --pickup-phone 55501001 --location "Reparto Sueño"
//!
//! # List delivery locations and fees
//! tb-cli locations
//!
//! # Run a session with live timers for 70 seconds
//! tb-cli demo --seconds 70
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products matching a category, search term and quick filter
//! - `checkout` - Validate an order and print the message and chat link
//! - `locations` - List delivery locations
//! - `demo` - Run a timed session and report its final state

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tech_bazaar_core::ServiceMode;
use tech_bazaar_storefront::config::StorefrontConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "tb-cli")]
#[command(author, version, about = "Tech Bazaar storefront tools")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Category name, or "All"
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Free-text search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Quick filter (All, Popular, Cheap, Expensive, Sale)
        #[arg(short, long, default_value = "All")]
        filter: String,

        /// Print products as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate an order and print the chat hand-off
    Checkout {
        /// Cart item as `ID` or `IDxQTY`, repeatable
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Dialing code for the contact phone
        #[arg(long)]
        country_code: Option<String>,

        /// Person collecting the order
        #[arg(long)]
        pickup_name: String,

        /// Phone of the person collecting the order
        #[arg(long)]
        pickup_phone: String,

        /// Service mode (delivery, pickup)
        #[arg(short, long, default_value_t = ServiceMode::Delivery)]
        mode: ServiceMode,

        /// Delivery location name
        #[arg(short, long)]
        location: Option<String>,

        /// Free-form note for the store
        #[arg(short, long)]
        note: Option<String>,

        /// Print the order summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List delivery locations and fees
    Locations,
    /// Run a session with live timers
    Demo {
        /// How long to run
        #[arg(short, long, default_value_t = 65)]
        seconds: u64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tech_bazaar_storefront=info,tb_cli=info".into());

    // Logs go to stderr so command output can be piped
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Catalog {
            category,
            search,
            filter,
            json,
        } => commands::catalog::list(&config, &category, &search, &filter, json)?,
        Commands::Checkout {
            items,
            phone,
            country_code,
            pickup_name,
            pickup_phone,
            mode,
            location,
            note,
            json,
        } => {
            let order = commands::checkout::OrderArgs {
                items,
                phone,
                country_code,
                pickup_name,
                pickup_phone,
                mode,
                location,
                note,
            };
            commands::checkout::run(config, order, json)?;
        }
        Commands::Locations => commands::locations::list(&config),
        Commands::Demo { seconds } => commands::demo::run(config, seconds).await?,
    }
    Ok(())
}
