use cratedigger_core::{CatalogItem, ItemId, WishlistEntry};
use cratedigger_storage::keys;
use tracing::{debug, instrument};

use crate::error::EngineError;
use crate::feedback::Feedback;
use crate::{Marketplace, check_price};

/// Saved-for-later albums. A set keyed by identity; order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    Added,
    Removed,
}

impl Wishlist {
    /// Later duplicates of an identity are dropped.
    pub fn from_entries(entries: Vec<WishlistEntry>) -> Self {
        let mut wishlist = Self::default();
        for entry in entries {
            if !wishlist.contains(&entry.id) {
                wishlist.entries.push(entry);
            }
        }
        wishlist
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn toggle(&mut self, item: &CatalogItem) -> WishlistToggle {
        let id = item.identity();
        match self.entries.iter().position(|e| e.id == id) {
            Some(i) => {
                self.entries.remove(i);
                WishlistToggle::Removed
            }
            None => {
                self.entries.push(WishlistEntry::from(item));
                WishlistToggle::Added
            }
        }
    }

    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        self.entries.len() != before
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistToggled {
    pub toggle: WishlistToggle,
    pub id: ItemId,
    pub title: String,
}

impl From<&WishlistToggled> for Feedback {
    fn from(toggled: &WishlistToggled) -> Self {
        match toggled.toggle {
            WishlistToggle::Added => Feedback::success(
                "Added to Wishlist",
                format!("{} has been added to your wishlist.", toggled.title),
            ),
            WishlistToggle::Removed => Feedback::success(
                "Removed from Wishlist",
                format!("{} has been removed from your wishlist.", toggled.title),
            ),
        }
    }
}

impl Marketplace {
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn wishlist_entries(&self) -> &[WishlistEntry] {
        self.wishlist.entries()
    }

    pub fn wishlist_len(&self) -> usize {
        self.wishlist.len()
    }

    pub fn is_wishlisted(&self, id: &ItemId) -> bool {
        self.wishlist.contains(id)
    }

    #[instrument(skip(self, item), fields(id = %item.identity()))]
    pub fn toggle_wishlist(&mut self, item: &CatalogItem) -> Result<WishlistToggled, EngineError> {
        if let Err(e) = check_price(item.price) {
            debug!(error = %e, "wishlist toggle rejected");
            return Err(e);
        }
        let toggle = self.wishlist.toggle(item);
        self.persist_wishlist();
        debug!(?toggle, "wishlist toggled");
        Ok(WishlistToggled {
            toggle,
            id: item.identity(),
            title: item.title.clone(),
        })
    }

    /// Returns whether an entry was removed.
    #[instrument(skip(self))]
    pub fn remove_from_wishlist(&mut self, id: &ItemId) -> bool {
        let removed = self.wishlist.remove(id);
        if removed {
            self.persist_wishlist();
        }
        removed
    }

    fn persist_wishlist(&mut self) {
        self.store.write_json(keys::WISHLIST, self.wishlist.entries());
    }
}

#[cfg(test)]
mod tests {
    use cratedigger_storage::Store;

    use super::*;

    fn album(title: &str) -> CatalogItem {
        CatalogItem {
            id: None,
            title: title.into(),
            artist: "Miles Davis".into(),
            price: 35.0,
            condition: "Mint".into(),
            year: 1959,
            image_url: String::new(),
            product_type: None,
        }
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut wishlist = Wishlist::default();
        let kind_of_blue = album("Kind of Blue");
        wishlist.toggle(&album("Bitches Brew"));
        let before = wishlist.clone();

        assert_eq!(wishlist.toggle(&kind_of_blue), WishlistToggle::Added);
        assert!(wishlist.contains(&kind_of_blue.identity()));
        assert_eq!(wishlist.toggle(&kind_of_blue), WishlistToggle::Removed);
        assert_eq!(wishlist, before);
    }

    #[test]
    fn loading_drops_duplicate_identities() {
        let entry = WishlistEntry::from(&album("Kind of Blue"));
        let wishlist = Wishlist::from_entries(vec![entry.clone(), entry]);
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn toggle_writes_through() {
        let mut market = Marketplace::new(Store::in_memory());
        let item = album("Kind of Blue");

        let toggled = market.toggle_wishlist(&item).unwrap();
        assert_eq!(toggled.toggle, WishlistToggle::Added);
        assert_eq!(Feedback::from(&toggled).title, "Added to Wishlist");
        let stored: Vec<WishlistEntry> = market.store().read_json(keys::WISHLIST);
        assert_eq!(stored.len(), 1);
        assert!(market.is_wishlisted(&item.identity()));

        assert!(market.remove_from_wishlist(&item.identity()));
        assert!(!market.remove_from_wishlist(&item.identity()));
        let stored: Vec<WishlistEntry> = market.store().read_json(keys::WISHLIST);
        assert!(stored.is_empty());
        assert_eq!(market.wishlist_len(), 0);
    }

    #[test]
    fn invalid_price_keeps_stored_wishlist_readable() {
        let mut market = Marketplace::new(Store::in_memory());
        market.toggle_wishlist(&album("Kind of Blue")).unwrap();

        let mut broken = album("Sketches of Spain");
        for price in [f64::NAN, -1.0] {
            broken.price = price;
            assert!(matches!(
                market.toggle_wishlist(&broken),
                Err(EngineError::InvalidPrice { .. })
            ));
        }
        assert!(!market.is_wishlisted(&broken.identity()));

        let stored: Vec<WishlistEntry> = market.store().read_json(keys::WISHLIST);
        assert_eq!(stored.len(), 1);
    }
}
