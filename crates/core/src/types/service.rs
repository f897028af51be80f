//! Order fulfillment modes.

use serde::{Deserialize, Serialize};

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceMode {
    /// Delivered to a location for a flat fee.
    #[default]
    Delivery,
    /// Collected at the store, no fee.
    Pickup,
}

impl ServiceMode {
    /// Human readable label used in order messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delivery => "Home delivery",
            Self::Pickup => "Store pickup",
        }
    }
}

impl std::fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivery => write!(f, "delivery"),
            Self::Pickup => write!(f, "pickup"),
        }
    }
}

impl std::str::FromStr for ServiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(Self::Delivery),
            "pickup" => Ok(Self::Pickup),
            _ => Err(format!("invalid service mode: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_display() {
        for mode in [ServiceMode::Delivery, ServiceMode::Pickup] {
            assert_eq!(mode.to_string().parse::<ServiceMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_invalid_mode() {
        assert_eq!(
            "courier".parse::<ServiceMode>().unwrap_err(),
            "invalid service mode: courier"
        );
    }

    #[test]
    fn test_default_is_delivery() {
        assert_eq!(ServiceMode::default(), ServiceMode::Delivery);
    }
}
