//! Typed command bus and outbound session events.
//!
//! Components never reach into the session directly. They hold a
//! [`CommandBus`] and enqueue [`Command`]s; the session applies one command
//! per turn. Whatever the presentation layer must surface (toasts, badge
//! updates) goes out as a [`SessionEvent`] on the broadcast side.

use tech_bazaar_core::ProductId;
use tokio::sync::{broadcast, mpsc};

use crate::catalog::Product;
use crate::filter::{CategorySelector, QuickFilter};
use crate::market::MarketRates;

/// Capacity of the outbound event channel. Slow subscribers lag, they never block the session.
const EVENT_BUFFER: usize = 64;

/// A single state change requested of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // Cart
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
    UpdateQuantity(ProductId, i64),
    /// The cart page's `+` button.
    IncrementQuantity(ProductId),
    /// The cart page's `-` button; removes the line at zero.
    DecrementQuantity(ProductId),
    ClearCart,

    // View state
    ChangeCategory(CategorySelector),
    ChangeFilter(QuickFilter),
    Search(String),
    /// Sent by the active-category chip.
    ClearCategory,
    ShowCart,
    ContinueShopping,
    SelectProduct(ProductId),
    CloseProduct,

    // Notification feed
    /// Sent by a notification item to open the product it announces.
    ViewNotificationProduct(ProductId),
    MarkNotificationsRead,
    ProductArrived(Product),

    // Timers
    RatesRefreshStarted,
    RatesRefreshed(MarketRates),
    AdvanceCarousel,

    // Carousel controls
    PreviousSlide,
    /// Sent by a carousel dot. Out-of-range indexes are ignored.
    GoToSlide(usize),

    /// Stop the session loop.
    Shutdown,
}

/// Notice published after the session applied a command.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A product was added to the cart (the "added to cart" toast).
    ItemAdded {
        id: ProductId,
        name: String,
        image: String,
    },
    /// The category selector went back to `All`.
    CategoryCleared,
    /// The detail view opened for a product.
    ProductDetailShown(Box<Product>),
    /// A new product entered the notification feed.
    NotificationArrived(ProductId),
    /// Exchange rates changed.
    RatesUpdated(MarketRates),
}

/// Cloneable sending half of the command queue.
#[derive(Debug, Clone)]
pub struct CommandBus {
    tx: mpsc::UnboundedSender<Command>,
}

/// Receiving half of the command queue, owned by the session loop.
pub type CommandReceiver = mpsc::UnboundedReceiver<Command>;

impl CommandBus {
    /// Create a bus and the receiver the session drains.
    #[must_use]
    pub fn new() -> (Self, CommandReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue a command. Returns false if the session is gone.
    pub fn send(&self, command: Command) -> bool {
        match self.tx.send(command) {
            Ok(()) => true,
            Err(mpsc::error::SendError(command)) => {
                tracing::debug!(?command, "Command dropped, session closed");
                false
            }
        }
    }

    /// Returns true once the receiving session has gone away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Broadcast side of session events.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create an event bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER);
        Self { tx }
    }

    /// Subscribe to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: SessionEvent) {
        // Err only means nobody is listening
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_arrive_in_order() {
        let (bus, mut rx) = CommandBus::new();
        assert!(bus.send(Command::ClearCategory));
        assert!(bus.send(Command::AddToCart(ProductId::from("1"))));

        assert_eq!(rx.try_recv().unwrap(), Command::ClearCategory);
        assert_eq!(
            rx.try_recv().unwrap(),
            Command::AddToCart(ProductId::from("1"))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (bus, rx) = CommandBus::new();
        drop(rx);
        assert!(bus.is_closed());
        assert!(!bus.send(Command::ShowCart));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let events = EventBus::new();
        events.publish(SessionEvent::CategoryCleared);

        let mut rx = events.subscribe();
        events.publish(SessionEvent::CategoryCleared);
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::CategoryCleared);
    }
}
