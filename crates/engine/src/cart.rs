use cratedigger_core::{CartLine, CatalogItem, ItemId};
use cratedigger_storage::keys;
use tracing::{debug, instrument};

use crate::error::EngineError;
use crate::feedback::Feedback;
use crate::{Marketplace, check_price};

/// Cart contents keyed by item identity, in insertion order.
///
/// At most one line per identity; a line never holds quantity zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Rebuild from persisted lines, merging duplicates and dropping empty lines.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::default();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.position(&line.id) {
                Some(i) => {
                    let existing = &mut cart.lines[i];
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the line's quantity after the add.
    pub fn add(&mut self, item: &CatalogItem) -> u32 {
        let id = item.identity();
        match self.position(&id) {
            Some(i) => {
                let line = &mut self.lines[i];
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines.push(CartLine::from_item(item, 1));
                1
            }
        }
    }

    pub fn remove(&mut self, id: &ItemId) -> Option<CartLine> {
        self.position(id).map(|i| self.lines.remove(i))
    }

    /// Zero or negative removes the line. Returns the resulting quantity, or
    /// `None` if no line exists afterwards.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: i64) -> Option<u32> {
        if quantity <= 0 {
            self.remove(id);
            return None;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let i = self.position(id)?;
        self.lines[i].quantity = quantity;
        Some(quantity)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartAdded {
    pub id: ItemId,
    pub title: String,
    pub artist: String,
    pub quantity: u32,
}

impl From<&CartAdded> for Feedback {
    fn from(added: &CartAdded) -> Self {
        Feedback::success(
            "Added to Cart",
            format!(
                "{} by {} has been added to your cart.",
                added.title, added.artist
            ),
        )
    }
}

impl Marketplace {
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn total_price(&self) -> f64 {
        self.cart.total_price()
    }

    /// Sum of quantities, the number on the header badge.
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Rejects items whose price is negative or not a number; nothing is
    /// written in that case.
    #[instrument(skip(self, item), fields(id = %item.identity()))]
    pub fn add_to_cart(&mut self, item: &CatalogItem) -> Result<CartAdded, EngineError> {
        if let Err(e) = check_price(item.price) {
            debug!(error = %e, "add to cart rejected");
            return Err(e);
        }
        let quantity = self.cart.add(item);
        self.persist_cart();
        debug!(quantity, "added to cart");
        Ok(CartAdded {
            id: item.identity(),
            title: item.title.clone(),
            artist: item.artist.clone(),
            quantity,
        })
    }

    /// Returns whether a line was removed. Absent ids are not an error.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: &ItemId) -> bool {
        let removed = self.cart.remove(id).is_some();
        self.persist_cart();
        debug!(removed, "removed from cart");
        removed
    }

    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) -> Option<u32> {
        let result = self.cart.set_quantity(id, quantity);
        self.persist_cart();
        debug!(?result, "cart quantity updated");
        result
    }

    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
        debug!("cart cleared");
    }

    fn persist_cart(&mut self) {
        self.store.write_json(keys::CART, self.cart.lines());
    }
}
