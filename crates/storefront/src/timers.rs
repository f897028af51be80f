//! Background timers feeding the session.
//!
//! Three tasks run on the tokio runtime: exchange rate refresh, carousel
//! rotation and simulated product arrivals. None of them touches session
//! state; each firing enqueues a command on the [`CommandBus`]. All tasks
//! share one cancellation token and stop when the [`Timers`] handle is shut
//! down or dropped, or when the session stops receiving.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::bus::{Command, CommandBus};
use crate::catalog::{Product, incoming_products};
use crate::config::{MarketConfig, StorefrontConfig};
use crate::market::MarketRates;

/// Handle to the running timer tasks.
#[derive(Debug)]
pub struct Timers {
    cancel: CancellationToken,
    refresh: Arc<Notify>,
    handles: Vec<JoinHandle<()>>,
}

impl Timers {
    /// Start every timer task. Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(config: &StorefrontConfig, bus: CommandBus) -> Self {
        let cancel = CancellationToken::new();
        let refresh = Arc::new(Notify::new());
        let timers = &config.timers;

        let arrivals = timers
            .arrival_delays
            .iter()
            .copied()
            .zip(incoming_products(config.currency))
            .collect();

        let handles = vec![
            tokio::spawn(refresh_rates(
                config.market,
                timers.rate_refresh_interval,
                timers.rate_refresh_latency,
                Arc::clone(&refresh),
                bus.clone(),
                cancel.child_token(),
            )),
            tokio::spawn(rotate_carousel(
                timers.carousel_interval,
                bus.clone(),
                cancel.child_token(),
            )),
            tokio::spawn(announce_arrivals(arrivals, bus, cancel.child_token())),
        ];

        debug!(tasks = handles.len(), "Timers started");
        Self {
            cancel,
            refresh,
            handles,
        }
    }

    /// Refresh exchange rates now instead of waiting for the next period.
    pub fn refresh_rates_now(&self) {
        self.refresh.notify_one();
    }

    /// Cancel every task and wait for them to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                warn!(error = %e, "Timer task ended abnormally");
            }
        }
        debug!("Timers stopped");
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Refresh rates once per `period` (first refresh immediately) and whenever
/// `refresh` is notified while no refresh is in flight.
async fn refresh_rates(
    market: MarketConfig,
    period: Duration,
    latency: Duration,
    refresh: Arc<Notify>,
    bus: CommandBus,
    cancel: CancellationToken,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            () = refresh.notified() => {}
        }

        if !bus.send(Command::RatesRefreshStarted) {
            break;
        }

        // Requests arriving while this refresh is in flight are dropped
        let in_flight = time::sleep(latency);
        tokio::pin!(in_flight);
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                () = &mut in_flight => break,
                () = refresh.notified() => debug!("Rate refresh already in flight"),
            }
        }

        let rates = MarketRates::random(&market, &mut rand::rng(), Utc::now());
        if !bus.send(Command::RatesRefreshed(rates)) {
            break;
        }
    }
}

/// Advance the carousel every `period`, starting one period from now.
async fn rotate_carousel(period: Duration, bus: CommandBus, cancel: CancellationToken) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        if !bus.send(Command::AdvanceCarousel) {
            break;
        }
    }
}

/// Announce each product once its delay (measured from task start) elapses.
async fn announce_arrivals(
    arrivals: Vec<(Duration, Product)>,
    bus: CommandBus,
    cancel: CancellationToken,
) {
    let start = Instant::now();

    for (delay, product) in arrivals {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            () = time::sleep_until(start + delay) => {}
        }

        debug!(product_id = %product.id, "Simulated product arrival");
        if !bus.send(Command::ProductArrived(product)) {
            return;
        }
    }
}
