use serde::{Deserialize, Serialize};

use crate::bid::ListingRef;
use crate::catalog::{Condition, MediaFormat};
use crate::ids::{ItemId, ListingId};

/// A seller's album as it appears in the marketplace after publishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedListing {
    pub id: ListingId,
    pub title: String,
    pub artist: String,
    pub format: MediaFormat,
    /// Asking price; bids overwrite it with the latest accepted amount.
    pub price: f64,
    pub condition: Condition,
    pub year: i32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub description: String,
    pub rating: u8,
    pub image_url: String,
    pub is_premium: bool,
    pub is_auction: bool,
    pub listed_at: String,
}

impl PublishedListing {
    pub fn item_id(&self) -> ItemId {
        ItemId::from(self.id)
    }
}

impl From<&PublishedListing> for ListingRef {
    fn from(listing: &PublishedListing) -> Self {
        Self {
            id: listing.item_id(),
            title: listing.title.clone(),
            artist: listing.artist.clone(),
            image_url: listing.image_url.clone(),
            current_price: listing.price,
        }
    }
}
