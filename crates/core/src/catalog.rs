use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ids::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    Vinyl,
    Cd,
    Cassette,
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vinyl => "Vinyl",
            Self::Cd => "CD",
            Self::Cassette => "Cassette",
        })
    }
}

impl FromStr for MediaFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vinyl" => Ok(Self::Vinyl),
            "cd" => Ok(Self::Cd),
            "cassette" => Ok(Self::Cassette),
            other => Err(CoreError::InvalidData(format!("unknown media format: {other}"))),
        }
    }
}

/// Record grading scale offered by the sell wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Mint,
    #[serde(rename = "Near Mint")]
    NearMint,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Self::Mint,
        Self::NearMint,
        Self::VeryGood,
        Self::Good,
        Self::Fair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mint => "Mint",
            Self::NearMint => "Near Mint",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidData(format!("unknown condition: {s}")))
    }
}

/// Snapshot of a catalog album as handed to the cart or wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub artist: String,
    pub price: f64,
    pub condition: String,
    pub year: i32,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<MediaFormat>,
}

impl CatalogItem {
    pub fn identity(&self) -> ItemId {
        ItemId::resolve(self.id.as_deref(), &self.title, &self.artist)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: ItemId,
    pub title: String,
    pub artist: String,
    pub price: f64,
    pub condition: String,
    pub year: i32,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<MediaFormat>,
    pub quantity: u32,
}

impl CartLine {
    pub fn from_item(item: &CatalogItem, quantity: u32) -> Self {
        Self {
            id: item.identity(),
            title: item.title.clone(),
            artist: item.artist.clone(),
            price: item.price,
            condition: item.condition.clone(),
            year: item.year,
            image_url: item.image_url.clone(),
            product_type: item.product_type,
            quantity,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: ItemId,
    pub title: String,
    pub artist: String,
    pub price: f64,
    pub condition: String,
    pub year: i32,
    pub image_url: String,
}

impl From<&CatalogItem> for WishlistEntry {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.identity(),
            title: item.title.clone(),
            artist: item.artist.clone(),
            price: item.price,
            condition: item.condition.clone(),
            year: item.year,
            image_url: item.image_url.clone(),
        }
    }
}

/// A cart line that made it through checkout into the buyer's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedItem {
    pub id: ItemId,
    pub title: String,
    pub artist: String,
    pub price: f64,
    pub condition: String,
    pub year: i32,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<MediaFormat>,
    pub purchase_date: NaiveDate,
}

impl PurchasedItem {
    pub fn from_line(line: &CartLine, purchase_date: NaiveDate) -> Self {
        Self {
            id: line.id.clone(),
            title: line.title.clone(),
            artist: line.artist.clone(),
            price: line.price,
            condition: line.condition.clone(),
            year: line.year,
            image_url: line.image_url.clone(),
            product_type: line.product_type,
            purchase_date,
        }
    }
}
