use cratedigger_core::{ItemId, ListingId, ListingRef, PublishedListing, PurchasedItem};
use cratedigger_storage::{KvWrite, keys};
use tracing::debug;

use crate::Marketplace;
use crate::error::EngineError;

impl Marketplace {
    /// The seller's published listings, oldest first.
    pub fn listings(&self) -> Vec<PublishedListing> {
        self.store.read_json(keys::USER_ALBUMS)
    }

    pub fn listing(&self, id: ListingId) -> Option<PublishedListing> {
        self.listings().into_iter().find(|l| l.id == id)
    }

    /// What the bid dialog needs for the listing behind `id`.
    pub fn listing_ref(&self, id: ListingId) -> Option<ListingRef> {
        self.listing(id).as_ref().map(ListingRef::from)
    }

    /// Purchased albums, in checkout order.
    pub fn collection(&self) -> Vec<PurchasedItem> {
        self.store.read_json(keys::USER_COLLECTION)
    }

    /// The `userAlbums` write that sets the asking price of the listing
    /// `item` points at.
    ///
    /// `None` for items that are not stored seller listings.
    pub(crate) fn listing_price_write(
        &self,
        item: &ItemId,
        price: f64,
    ) -> Result<Option<KvWrite>, EngineError> {
        let Some(id) = item.listing_id() else {
            return Ok(None);
        };
        let mut listings = self.listings();
        let Some(listing) = listings.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        listing.price = price;
        debug!(listing = %id, price, "listing price staged");
        Ok(Some(KvWrite::json(keys::USER_ALBUMS, &listings)?))
    }
}

#[cfg(test)]
mod tests {
    use cratedigger_core::{Condition, MediaFormat};
    use cratedigger_storage::Store;

    use super::*;

    fn listing(title: &str, price: f64) -> PublishedListing {
        PublishedListing {
            id: ListingId::new(),
            title: title.into(),
            artist: "Led Zeppelin".into(),
            format: MediaFormat::Vinyl,
            price,
            condition: Condition::VeryGood,
            year: 1971,
            genre: "Rock".into(),
            description: String::new(),
            rating: 4,
            image_url: String::new(),
            is_premium: false,
            is_auction: false,
            listed_at: "2024-01-20T10:00:00.000Z".into(),
        }
    }

    #[test]
    fn price_update_targets_listing_by_identity() {
        let mut store = Store::in_memory();
        // Same title and artist, different listings.
        let first = listing("Led Zeppelin IV", 60.0);
        let second = listing("Led Zeppelin IV", 80.0);
        store.write_json(keys::USER_ALBUMS, &vec![first.clone(), second.clone()]);
        let mut market = Marketplace::new(store);

        let write = market.listing_price_write(&second.item_id(), 95.0).unwrap();
        assert_eq!(market.listing(second.id).map(|l| l.price), Some(80.0));
        market.store.write_batch(&[write.unwrap()]);
        assert_eq!(market.listing(first.id).map(|l| l.price), Some(60.0));
        assert_eq!(market.listing(second.id).map(|l| l.price), Some(95.0));
    }

    #[test]
    fn catalog_items_are_not_listings() {
        let market = Marketplace::new(Store::in_memory());
        let catalog = ItemId::derive("Led Zeppelin IV", "Led Zeppelin");
        assert!(market.listing_price_write(&catalog, 10.0).unwrap().is_none());
        let unknown = ItemId::from(ListingId::new());
        assert!(market.listing_price_write(&unknown, 10.0).unwrap().is_none());
        assert!(market.listings().is_empty());
    }

    #[test]
    fn listing_ref_carries_stored_price() {
        let mut store = Store::in_memory();
        let stored = listing("Houses of the Holy", 42.0);
        store.write_json(keys::USER_ALBUMS, &vec![stored.clone()]);
        let market = Marketplace::new(store);

        let found = market.listing_ref(stored.id).unwrap();
        assert_eq!(found.id, stored.item_id());
        assert_eq!(found.current_price, 42.0);
        assert!(market.listing_ref(ListingId::new()).is_none());
    }
}
