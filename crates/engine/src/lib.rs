pub mod account;
pub mod bids;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod feedback;
pub mod listings;
pub mod notifications;
pub mod wishlist;
pub mod wizard;

pub use bids::{BidPlaced, parse_bid_amount};
pub use cart::{Cart, CartAdded};
pub use checkout::CheckoutReceipt;
pub use config::{ConfigError, MarketConfig};
pub use error::EngineError;
pub use feedback::{Feedback, FeedbackVariant};
pub use wishlist::{Wishlist, WishlistToggle, WishlistToggled};
pub use wizard::{DraftSaved, ListingPublished, ListingWizard, WizardMount};

use cratedigger_core::{
    BidRecord, DraftState, Notification,
    clock::{self, MonotonicClock},
};
use cratedigger_storage::{SqliteKvStore, Store, keys};
use tracing::{debug, info};

/// One shopper's session over a persisted store.
///
/// Every UI surface that reads or mutates cart, wishlist, bids, drafts or
/// listings goes through the same `Marketplace` value; there is no ambient
/// global state. Mutations write through to the store before returning.
pub struct Marketplace {
    config: MarketConfig,
    clock: MonotonicClock,
    store: Store,
    cart: Cart,
    wishlist: Wishlist,
    wizard: ListingWizard,
}

impl Marketplace {
    pub fn new(store: Store) -> Self {
        Self::with_config(store, MarketConfig::default())
    }

    pub fn with_config(store: Store, config: MarketConfig) -> Self {
        let mut market = Self {
            config,
            clock: MonotonicClock::new(),
            store,
            cart: Cart::default(),
            wishlist: Wishlist::default(),
            wizard: ListingWizard::new(),
        };
        market.reload();
        market
    }

    /// Open the SQLite file named in `config.store_path`, or a fresh
    /// in-memory store when no path is configured.
    pub fn open(config: MarketConfig) -> Result<Self, EngineError> {
        let store = match &config.store_path {
            Some(path) => {
                info!(path = %path.display(), "opening sqlite store");
                Store::new(SqliteKvStore::open(path)?)
            }
            None => Store::in_memory(),
        };
        Ok(Self::with_config(store, config))
    }

    /// Re-read every aggregate from the store, dropping in-memory state.
    pub fn reload(&mut self) {
        self.cart = Cart::from_lines(self.store.read_json(keys::CART));
        self.wishlist = Wishlist::from_entries(self.store.read_json(keys::WISHLIST));
        self.wizard = self
            .store
            .read_json_opt::<DraftState>(keys::ALBUM_DRAFT)
            .map(ListingWizard::from_state)
            .unwrap_or_default();

        let newest_bid = self
            .store
            .read_json::<Vec<BidRecord>>(keys::USER_BIDS)
            .iter()
            .map(|b| b.id.as_millis())
            .max()
            .unwrap_or(0);
        let newest_notification = self
            .store
            .read_json::<Vec<Notification>>(keys::NOTIFICATIONS)
            .iter()
            .map(|n| n.id.as_millis())
            .max()
            .unwrap_or(0);
        self.clock.observe(newest_bid.max(newest_notification));

        debug!(
            cart_lines = self.cart.len(),
            wishlist = self.wishlist.len(),
            step = %self.wizard.step(),
            "session state loaded"
        );
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn tick(&mut self) -> Result<u64, EngineError> {
        Ok(self.clock.tick()?)
    }

    fn timestamp(&mut self) -> Result<(u64, String), EngineError> {
        let ms = self.tick()?;
        Ok((ms, clock::rfc3339(ms)?))
    }
}

/// Prices coming in from the catalog must be finite and not negative.
pub(crate) fn check_price(price: f64) -> Result<(), EngineError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidPrice { price })
    }
}

impl std::fmt::Debug for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marketplace")
            .field("cart_lines", &self.cart.len())
            .field("wishlist", &self.wishlist.len())
            .field("wizard_step", &self.wizard.step())
            .finish_non_exhaustive()
    }
}
