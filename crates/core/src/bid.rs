use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{BidId, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Active,
    Won,
    Lost,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The listing a bid is aimed at, as the bid dialog sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRef {
    pub id: ItemId,
    pub title: String,
    pub artist: String,
    pub image_url: String,
    pub current_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRecord {
    pub id: BidId,
    pub listing_id: ItemId,
    pub album_title: String,
    pub album_artist: String,
    pub album_image_url: String,
    /// Price the bid had to beat when it was placed.
    pub current_price: f64,
    pub bid_amount: f64,
    pub bid_date: String,
    pub status: BidStatus,
}

impl BidRecord {
    pub fn is_active(&self) -> bool {
        self.status == BidStatus::Active
    }
}
