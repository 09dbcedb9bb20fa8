use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! uuid_id {
    ($name:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn parse(s: &str) -> Result<Self, CoreError> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| CoreError::InvalidIdentity(format!("{s}: {e}")))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), &self.0.to_string()[..8])
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(ListingId);

const LISTING_ITEM_PREFIX: &str = "listing-";

/// Deduplication key for one catalog item across cart and wishlist.
///
/// Either an explicit id handed in by the catalog, or a slug derived from
/// (title, artist) so that differently cased or spaced references collide.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Title and artist slugs are joined with the same `-` that replaces
    /// whitespace, so ("Paranoid Black", "Sabbath") and ("Paranoid", "Black
    /// Sabbath") derive the same id. Catalog items that can clash should
    /// carry an explicit id.
    pub fn derive(title: &str, artist: &str) -> Self {
        Self(format!("{}-{}", slug(title), slug(artist)))
    }

    /// Uses `explicit` when it is present and non-blank, else derives.
    pub fn resolve(explicit: Option<&str>, title: &str, artist: &str) -> Self {
        match explicit.map(str::trim) {
            Some(id) if !id.is_empty() => Self(id.to_string()),
            _ => Self::derive(title, artist),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The listing this item points at, if it was minted from a `ListingId`.
    pub fn listing_id(&self) -> Option<ListingId> {
        self.0
            .strip_prefix(LISTING_ITEM_PREFIX)
            .and_then(|rest| ListingId::parse(rest).ok())
    }
}

impl From<ListingId> for ItemId {
    fn from(id: ListingId) -> Self {
        Self(format!("{LISTING_ITEM_PREFIX}{id}"))
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn slug(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

macro_rules! millis_id {
    ($name:ident) => {
        /// Millisecond timestamp handed out by a `MonotonicClock`.
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub fn from_millis(ms: u64) -> Self {
                Self(ms)
            }

            pub fn as_millis(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

millis_id!(BidId);
millis_id!(NotificationId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_identity_ignores_case_and_spacing() {
        let a = ItemId::derive("Dark Side of the Moon", "Pink Floyd");
        let b = ItemId::derive("  dark side   OF the moon ", "pink\tfloyd");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "dark-side-of-the-moon-pink-floyd");
    }

    #[test]
    fn explicit_identity_wins_unless_blank() {
        assert_eq!(
            ItemId::resolve(Some("sku-42"), "Nevermind", "Nirvana").as_str(),
            "sku-42"
        );
        assert_eq!(
            ItemId::resolve(Some("   "), "Nevermind", "Nirvana").as_str(),
            "nevermind-nirvana"
        );
        assert_eq!(
            ItemId::resolve(None, "Nevermind", "Nirvana").as_str(),
            "nevermind-nirvana"
        );
    }

    #[test]
    fn split_between_title_and_artist_is_not_preserved() {
        let a = ItemId::derive("Paranoid Black", "Sabbath");
        let b = ItemId::derive("Paranoid", "Black Sabbath");
        assert_eq!(a, b);

        let a = ItemId::resolve(Some("sku-1"), "Paranoid Black", "Sabbath");
        let b = ItemId::resolve(Some("sku-2"), "Paranoid", "Black Sabbath");
        assert_ne!(a, b);
    }

    #[test]
    fn listing_item_id_recovers_listing() {
        let listing = ListingId::new();
        let item = ItemId::from(listing);
        assert_eq!(item.listing_id(), Some(listing));
        assert_eq!(ItemId::derive("Abbey Road", "The Beatles").listing_id(), None);
    }

    #[test]
    fn ids_serialize_as_plain_json_scalars() {
        let item = ItemId::new("abc");
        assert_eq!(serde_json::to_string(&item).unwrap(), "\"abc\"");
        let bid = BidId::from_millis(1_700_000_000_000);
        assert_eq!(serde_json::to_string(&bid).unwrap(), "1700000000000");
        let listing = ListingId::new();
        let json = serde_json::to_string(&listing).unwrap();
        assert_eq!(json, format!("\"{listing}\""));
    }
}
