//! Bid ledger.
//!
//! Bids are appended to `userBids` and never removed. The only field that
//! changes after placement is `status`, and only through
//! [`Marketplace::set_bid_status`], which an auction-close process calls once
//! the outcome is known.

use cratedigger_core::{BidId, BidRecord, BidStatus, ItemId, ListingRef, NotificationKind};
use cratedigger_storage::{KvWrite, keys};
use tracing::{debug, info, instrument};

use crate::{Marketplace, check_price};
use crate::error::EngineError;
use crate::feedback::Feedback;
use crate::notifications;

/// Parse the text typed into the bid box.
pub fn parse_bid_amount(input: &str) -> Result<f64, EngineError> {
    match input.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(EngineError::InvalidBidFormat {
            input: input.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BidPlaced {
    pub record: BidRecord,
    /// Whether a seller listing had its price raised to the bid.
    pub listing_updated: bool,
}

impl From<&BidPlaced> for Feedback {
    fn from(placed: &BidPlaced) -> Self {
        Feedback::success(
            "Bid Placed Successfully!",
            format!(
                "Your bid of ${} for {} has been placed.",
                placed.record.bid_amount, placed.record.album_title
            ),
        )
    }
}

impl Marketplace {
    pub fn bids(&self) -> Vec<BidRecord> {
        self.store.read_json(keys::USER_BIDS)
    }

    pub fn bids_for_listing(&self, listing: &ItemId) -> Vec<BidRecord> {
        self.bids()
            .into_iter()
            .filter(|b| &b.listing_id == listing)
            .collect()
    }

    pub fn active_bid_count(&self) -> usize {
        self.bids().iter().filter(|b| b.is_active()).count()
    }

    /// The price a new bid has to beat: the stored listing's price when the
    /// reference points at a seller listing, else the price it carries.
    pub fn current_price_of(&self, listing: &ListingRef) -> f64 {
        listing
            .id
            .listing_id()
            .and_then(|id| self.listing(id))
            .map_or(listing.current_price, |stored| stored.price)
    }

    pub fn minimum_bid(&self, listing: &ListingRef) -> f64 {
        self.current_price_of(listing) + self.config.min_bid_increment
    }

    /// Validate `amount` against `current_price` without touching the ledger.
    pub fn check_bid(&self, amount: f64, current_price: f64) -> Result<(), EngineError> {
        check_price(current_price)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::InvalidBidFormat {
                input: amount.to_string(),
            });
        }
        if amount > self.config.bid_ceiling {
            return Err(EngineError::BidCeilingExceeded {
                amount,
                maximum: self.config.bid_ceiling,
            });
        }
        if amount <= current_price {
            return Err(EngineError::BidTooLow {
                amount,
                current_price,
                minimum: current_price + self.config.min_bid_increment,
            });
        }
        Ok(())
    }

    #[instrument(skip(self, listing), fields(listing = %listing.id))]
    pub fn place_bid(&mut self, listing: &ListingRef, amount: f64) -> Result<BidPlaced, EngineError> {
        let current_price = self.current_price_of(listing);
        if let Err(e) = self.check_bid(amount, current_price) {
            debug!(error = %e, "bid rejected");
            return Err(e);
        }

        let (ms, bid_date) = self.timestamp()?;
        let record = BidRecord {
            id: BidId::from_millis(ms),
            listing_id: listing.id.clone(),
            album_title: listing.title.clone(),
            album_artist: listing.artist.clone(),
            album_image_url: listing.image_url.clone(),
            current_price,
            bid_amount: amount,
            bid_date,
            status: BidStatus::Active,
        };

        let notification = notifications::unread(
            ms,
            NotificationKind::Bid,
            format!("Bid Placed - {}", listing.title),
            format!("Your bid of ${amount} has been placed successfully"),
        );

        let mut bids = self.bids();
        bids.push(record.clone());
        let mut writes = vec![
            KvWrite::json(keys::USER_BIDS, &bids)?,
            self.prepend_write(&notification)?,
        ];
        let price_write = self.listing_price_write(&listing.id, amount)?;
        let listing_updated = price_write.is_some();
        writes.extend(price_write);
        // Ledger, notification and listing price land together or not at all.
        self.store.write_batch(&writes);

        info!(bid = %record.id, amount, listing_updated, "bid placed");
        Ok(BidPlaced {
            record,
            listing_updated,
        })
    }

    /// [`Marketplace::place_bid`] for raw text from the bid box.
    pub fn place_bid_text(
        &mut self,
        listing: &ListingRef,
        input: &str,
    ) -> Result<BidPlaced, EngineError> {
        let amount = parse_bid_amount(input)?;
        self.place_bid(listing, amount)
    }

    #[instrument(skip(self))]
    pub fn set_bid_status(&mut self, id: BidId, status: BidStatus) -> Result<BidRecord, EngineError> {
        let mut bids = self.bids();
        let bid = bids
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(EngineError::BidNotFound(id))?;
        bid.status = status;
        let updated = bid.clone();
        self.store.write_json(keys::USER_BIDS, &bids);
        info!(%status, "bid status set");
        Ok(updated)
    }
}
