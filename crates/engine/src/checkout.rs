use cratedigger_core::{PurchasedItem, clock};
use cratedigger_storage::{KvWrite, keys};
use tracing::{debug, info, instrument};

use crate::Marketplace;
use crate::error::EngineError;
use crate::feedback::Feedback;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub items: Vec<PurchasedItem>,
    pub total_items: u64,
    pub total_price: f64,
}

impl From<&CheckoutReceipt> for Feedback {
    fn from(receipt: &CheckoutReceipt) -> Self {
        Feedback::success(
            "Purchase Successful!",
            format!(
                "Thank you for your purchase of {} albums! ${:.2} has been charged.",
                receipt.total_items, receipt.total_price
            ),
        )
    }
}

impl Marketplace {
    /// Move every cart line into the collection, dated today, and empty the
    /// cart. Both keys change in one backend batch.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, EngineError> {
        if self.cart.is_empty() {
            debug!("checkout rejected: cart is empty");
            return Err(EngineError::EmptyCart);
        }

        let today = clock::calendar_date(self.tick()?)?;
        let items: Vec<PurchasedItem> = self
            .cart
            .lines()
            .iter()
            .map(|line| PurchasedItem::from_line(line, today))
            .collect();

        let mut collection = self.collection();
        collection.extend(items.iter().cloned());
        self.store.write_batch(&[
            KvWrite::json(keys::USER_COLLECTION, &collection)?,
            KvWrite::set(keys::CART, "[]"),
        ]);

        let receipt = CheckoutReceipt {
            items,
            total_items: self.cart.total_items(),
            total_price: self.cart.total_price(),
        };
        self.cart.clear();

        info!(
            lines = receipt.items.len(),
            total_items = receipt.total_items,
            total_price = receipt.total_price,
            "checkout complete"
        );
        Ok(receipt)
    }
}
