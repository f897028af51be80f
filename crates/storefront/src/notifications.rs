//! "New product" notification feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tech_bazaar_core::{Category, Price, ProductId};
use tracing::{debug, info};

use crate::catalog::Product;

/// A product announcement in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub original_price: Option<Price>,
    pub image: String,
    pub category: Category,
    pub brand: Option<String>,
    pub is_new: bool,
    pub timestamp: DateTime<Utc>,
}

impl NotificationEntry {
    /// Snapshot `product` as announced at `timestamp`.
    #[must_use]
    pub fn for_product(product: &Product, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            image: product.image.clone(),
            category: product.category,
            brand: product.brand.clone(),
            is_new: product.is_new,
            timestamp,
        }
    }

    /// How long ago the entry was created, relative to `now`.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> EntryAge {
        let minutes = (now - self.timestamp).num_minutes();
        if minutes < 1 {
            EntryAge::JustNow
        } else if minutes < 60 {
            EntryAge::Minutes(minutes)
        } else {
            EntryAge::Hours(minutes / 60)
        }
    }
}

/// Coarse age of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAge {
    JustNow,
    Minutes(i64),
    Hours(i64),
}

impl std::fmt::Display for EntryAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JustNow => write!(f, "just now"),
            Self::Minutes(n) => write!(f, "{n} min ago"),
            Self::Hours(n) => write!(f, "{n} h ago"),
        }
    }
}

/// Newest-first list of announcements with an unread marker.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    entries: Vec<NotificationEntry>,
    has_unread: bool,
}

impl NotificationFeed {
    /// Create an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry` at the front unless its product is already announced.
    ///
    /// Returns true if the entry was added; every successful insert marks the
    /// feed unread.
    pub fn insert(&mut self, entry: NotificationEntry) -> bool {
        if self.contains(&entry.id) {
            debug!(product_id = %entry.id, "Notification already present");
            return false;
        }

        info!(product_id = %entry.id, "New product notification");
        self.entries.insert(0, entry);
        self.has_unread = true;
        true
    }

    /// Returns true if `id` has an entry.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    /// The entry for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&NotificationEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[NotificationEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if something arrived since the last acknowledgement.
    #[must_use]
    pub const fn has_unread(&self) -> bool {
        self.has_unread
    }

    /// Acknowledge every entry.
    pub fn mark_as_read(&mut self) {
        self.has_unread = false;
    }

    /// Drop every entry and the unread marker.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.has_unread = false;
    }
}
