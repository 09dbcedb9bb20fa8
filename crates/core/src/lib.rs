pub mod bid;
pub mod catalog;
pub mod clock;
pub mod draft;
pub mod error;
pub mod ids;
pub mod listing;
pub mod notification;
pub mod profile;

pub use bid::{BidRecord, BidStatus, ListingRef};
pub use catalog::{CartLine, CatalogItem, Condition, MediaFormat, PurchasedItem, WishlistEntry};
pub use clock::MonotonicClock;
pub use draft::{DraftForm, DraftState, WizardStep};
pub use error::CoreError;
pub use ids::*;
pub use listing::PublishedListing;
pub use notification::{Notification, NotificationKind};
pub use profile::UserProfile;
