//! The storefront session: one explicit context object owning all state.
//!
//! Every mutation arrives as a [`Command`] and is applied to completion by
//! [`Session::handle`] before the next one is looked at, so no state is ever
//! shared across tasks and nothing needs a lock.

use std::ops::ControlFlow;

use chrono::{DateTime, Utc};
use tech_bazaar_core::ProductId;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::bus::{Command, CommandReceiver, EventBus, SessionEvent};
use crate::carousel::PromoCarousel;
use crate::cart::Cart;
use crate::catalog::{Catalog, Product};
use crate::checkout::{self, CheckoutError, CheckoutForm, CheckoutOutcome};
use crate::config::StorefrontConfig;
use crate::market::MarketRates;
use crate::notifications::{NotificationEntry, NotificationFeed};
use crate::view_state::ViewState;

/// Commands the session could not apply.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// Application session state.
#[derive(Debug)]
pub struct Session {
    config: StorefrontConfig,
    catalog: Catalog,
    /// Products introduced after seeding, in arrival order.
    arrivals: Vec<Product>,
    cart: Cart,
    feed: NotificationFeed,
    view: ViewState,
    rates: Option<MarketRates>,
    rates_loading: bool,
    carousel: PromoCarousel,
    events: EventBus,
}

impl Session {
    /// Start a session over the seeded catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = Catalog::seeded(config.currency);
        Self::with_catalog(config, catalog)
    }

    /// Start a session over `catalog`. Products flagged new are announced
    /// in the feed right away.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let events = EventBus::new();
        let cart = Cart::new(config.currency).with_events(events.clone());

        let mut feed = NotificationFeed::new();
        let now = Utc::now();
        for product in catalog.new_arrivals() {
            feed.insert(NotificationEntry::for_product(product, now));
        }

        info!(
            products = catalog.len(),
            announced = feed.len(),
            "Session started"
        );

        Self {
            config,
            catalog,
            arrivals: Vec::new(),
            cart,
            feed,
            view: ViewState::new(),
            rates: None,
            rates_loading: false,
            carousel: PromoCarousel::standard(),
            events,
        }
    }

    /// Apply one command.
    ///
    /// Returns `ControlFlow::Break` on [`Command::Shutdown`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownProduct` when a command names a product
    /// that is neither in the catalog nor among the arrivals. The state is
    /// left unchanged in that case.
    #[instrument(skip(self), level = "debug")]
    pub fn handle(&mut self, command: Command) -> Result<ControlFlow<()>, SessionError> {
        match command {
            Command::AddToCart(id) => {
                let product = self.lookup(&id)?.clone();
                self.cart.add_to_cart(&product);
            }
            Command::RemoveFromCart(id) => {
                self.cart.remove_from_cart(&id);
            }
            Command::UpdateQuantity(id, quantity) => self.cart.update_quantity(&id, quantity),
            Command::IncrementQuantity(id) => self.cart.increment(&id),
            Command::DecrementQuantity(id) => self.cart.decrement(&id),
            Command::ClearCart => self.cart.clear(),

            Command::ChangeCategory(category) => self.view.change_category(category),
            Command::ChangeFilter(filter) => self.view.change_filter(filter),
            Command::Search(term) => self.view.search(term),
            Command::ClearCategory => {
                self.view.clear_category();
                self.events.publish(SessionEvent::CategoryCleared);
            }
            Command::ShowCart => self.view.show_cart(),
            Command::ContinueShopping => self.view.continue_shopping(),
            Command::SelectProduct(id) => {
                let product = self.lookup(&id)?.clone();
                self.view.select_product(product);
            }
            Command::CloseProduct => self.view.close_product(),

            Command::ViewNotificationProduct(id) => {
                if !self.feed.contains(&id) {
                    return Err(SessionError::UnknownProduct(id));
                }
                let product = self.lookup(&id)?.clone();
                self.view.select_product(product.clone());
                self.events
                    .publish(SessionEvent::ProductDetailShown(Box::new(product)));
            }
            Command::MarkNotificationsRead => self.feed.mark_as_read(),
            Command::ProductArrived(product) => self.product_arrived(product, Utc::now()),

            Command::RatesRefreshStarted => self.rates_loading = true,
            Command::RatesRefreshed(rates) => {
                debug!(usd = rates.usd, eur = rates.eur, "Rates refreshed");
                self.rates = Some(rates);
                self.rates_loading = false;
                self.events.publish(SessionEvent::RatesUpdated(rates));
            }
            Command::AdvanceCarousel => self.carousel.next(),
            Command::PreviousSlide => self.carousel.previous(),
            Command::GoToSlide(index) => self.carousel.go_to(index),

            Command::Shutdown => {
                info!("Session shutting down");
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Apply commands from `commands` until `Shutdown` or every sender is gone.
    ///
    /// Rejected commands are logged and skipped.
    pub async fn run(mut self, mut commands: CommandReceiver) -> Self {
        while let Some(command) = commands.recv().await {
            match self.handle(command) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => break,
                Err(e) => warn!(error = %e, "Command rejected"),
            }
        }
        self
    }

    fn product_arrived(&mut self, product: Product, now: DateTime<Utc>) {
        let entry = NotificationEntry::for_product(&product, now);
        if !self.feed.insert(entry) {
            return;
        }

        self.events
            .publish(SessionEvent::NotificationArrived(product.id.clone()));
        if self.catalog.find(&product.id).is_none()
            && !self.arrivals.iter().any(|p| p.id == product.id)
        {
            self.arrivals.push(product);
        }
    }

    /// A product from the catalog or the arrivals.
    fn lookup(&self, id: &ProductId) -> Result<&Product, SessionError> {
        self.catalog
            .find(id)
            .or_else(|| self.arrivals.iter().find(|p| &p.id == id))
            .ok_or_else(|| SessionError::UnknownProduct(id.clone()))
    }

    /// Validate `form` against the current cart and build the chat hand-off.
    ///
    /// # Errors
    ///
    /// See [`checkout::submit`].
    pub fn checkout(
        &self,
        form: CheckoutForm,
        now: DateTime<Utc>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        checkout::submit(form, &self.cart, &self.config.checkout, now)
    }

    /// Catalog products matching the current view.
    #[must_use]
    pub fn listing(&self) -> Vec<&Product> {
        self.view.query().apply(&self.catalog)
    }

    /// An empty checkout form with the configured defaults.
    #[must_use]
    pub fn checkout_form(&self) -> CheckoutForm {
        CheckoutForm::new(&self.config.checkout)
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn arrivals(&self) -> &[Product] {
        &self.arrivals
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Latest exchange rates, `None` until the first refresh lands.
    #[must_use]
    pub const fn rates(&self) -> Option<&MarketRates> {
        self.rates.as_ref()
    }

    /// Returns true while a rate refresh is in flight.
    #[must_use]
    pub const fn rates_loading(&self) -> bool {
        self.rates_loading
    }

    #[must_use]
    pub const fn carousel(&self) -> &PromoCarousel {
        &self.carousel
    }

    /// Event bus to subscribe to session notices.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }
}
