use cratedigger_core::{BidId, CoreError, WizardStep};
use cratedigger_storage::StorageError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("price must be a finite amount of at least $0, got {price}")]
    InvalidPrice { price: f64 },

    #[error("bid amount must be a positive number, got {input:?}")]
    InvalidBidFormat { input: String },

    #[error("bid of ${amount} exceeds the maximum bid of ${maximum}")]
    BidCeilingExceeded { amount: f64, maximum: f64 },

    #[error(
        "bid of ${amount} must be higher than the current price of ${current_price} (minimum bid: ${minimum})"
    )]
    BidTooLow {
        amount: f64,
        current_price: f64,
        minimum: f64,
    },

    #[error("{step} is incomplete: missing {}", .missing.join(", "))]
    ValidationIncomplete {
        step: WizardStep,
        missing: Vec<&'static str>,
    },

    #[error("listing can only be published from the review step, wizard is at {step}")]
    PublishNotReady { step: WizardStep },

    #[error("cart is empty")]
    EmptyCart,

    #[error("bid not found: {0}")]
    BidNotFound(BidId),
}
