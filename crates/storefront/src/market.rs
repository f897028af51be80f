//! Simulated local exchange rates shown beside the catalog.
//!
//! Rates are a fixed base plus one random variation shared by both
//! currencies; the direction of that variation is the trend.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MarketConfig;

/// Direction of the last rate movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

/// One snapshot of the exchange rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketRates {
    pub usd: f64,
    pub eur: f64,
    pub trend: Trend,
    pub last_update: DateTime<Utc>,
}

impl MarketRates {
    /// Rates for a given variation, clamped to the configured range.
    #[must_use]
    pub fn sample(config: &MarketConfig, variation: f64, now: DateTime<Utc>) -> Self {
        let bound = config.max_variation.abs();
        let variation = variation.clamp(-bound, bound);

        Self {
            usd: config.base_usd + variation,
            eur: config.base_eur + variation,
            trend: if variation > 0.0 {
                Trend::Up
            } else {
                Trend::Down
            },
            last_update: now,
        }
    }

    /// Rates with a variation drawn uniformly from `[-max, max)`.
    pub fn random(config: &MarketConfig, rng: &mut impl Rng, now: DateTime<Utc>) -> Self {
        let bound = config.max_variation.abs();
        let variation = if bound > 0.0 {
            rng.random_range(-bound..bound)
        } else {
            0.0
        };
        Self::sample(config, variation, now)
    }

    /// USD rate rounded for display.
    #[must_use]
    pub fn usd_display(&self) -> String {
        format!("{:.2}", self.usd)
    }

    /// EUR rate rounded for display.
    #[must_use]
    pub fn eur_display(&self) -> String {
        format!("{:.2}", self.eur)
    }
}
