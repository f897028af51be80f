//! Timed demo session.
//!
//! Runs a session with live background timers, logs what it publishes, then
//! stops the timers, shuts the session down and prints its final state.
//!
//! # Usage
//!
//! ```bash
//! # Long enough to see both simulated product arrivals
//! tb-cli demo --seconds 65
//!
//! # With per-command tracing
//! RUST_LOG=tech_bazaar_storefront=debug tb-cli demo --seconds 10
//! ```

use std::time::Duration;

use tech_bazaar_storefront::bus::{Command, CommandBus, SessionEvent};
use tech_bazaar_storefront::config::StorefrontConfig;
use tech_bazaar_storefront::session::Session;
use tech_bazaar_storefront::timers::Timers;
use tokio::sync::broadcast::error::RecvError;

use super::CommandError;

/// Run the demo for `seconds`.
///
/// # Errors
///
/// Returns an error if the session task fails.
pub async fn run(config: StorefrontConfig, seconds: u64) -> Result<(), CommandError> {
    let (bus, commands) = CommandBus::new();
    let session = Session::new(config.clone());
    let mut events = session.events().subscribe();

    let session_task = tokio::spawn(session.run(commands));
    let timers = Timers::spawn(&config, bus.clone());
    tracing::info!(seconds, "Demo session running");

    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            () = &mut deadline => break,
            event = events.recv() => match event {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    timers.shutdown().await;
    bus.send(Command::Shutdown);
    let session = session_task.await?;

    report(&session);
    Ok(())
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::RatesUpdated(rates) => tracing::info!(
            usd = %rates.usd_display(),
            eur = %rates.eur_display(),
            trend = ?rates.trend,
            "Exchange rates updated"
        ),
        SessionEvent::NotificationArrived(id) => {
            tracing::info!(product_id = %id, "New product announced");
        }
        SessionEvent::ItemAdded { name, .. } => tracing::info!(%name, "Added to cart"),
        SessionEvent::CategoryCleared => tracing::info!("Category cleared"),
        SessionEvent::ProductDetailShown(product) => {
            tracing::info!(product_id = %product.id, "Product detail shown");
        }
    }
}

#[allow(clippy::print_stdout)]
fn report(session: &Session) {
    println!(
        "Notifications: {} (unread: {})",
        session.feed().len(),
        session.feed().has_unread()
    );
    for entry in session.feed().entries() {
        println!("  {} {} {}", entry.id, entry.name, entry.price);
    }

    match session.rates() {
        Some(rates) => println!(
            "Rates: USD {} EUR {} ({:?})",
            rates.usd_display(),
            rates.eur_display(),
            rates.trend
        ),
        None => println!("Rates: not loaded"),
    }

    if let Some(slide) = session.carousel().current() {
        println!(
            "Carousel: slide {}/{} {}",
            session.carousel().index() + 1,
            session.carousel().len(),
            slide.title
        );
    }
}
