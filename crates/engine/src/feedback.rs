//! Toast-style messages for the UI to render after an operation.

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackVariant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub variant: FeedbackVariant,
    pub title: String,
    pub description: String,
}

impl Feedback {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: FeedbackVariant::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: FeedbackVariant::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.variant == FeedbackVariant::Success
    }
}

impl From<&EngineError> for Feedback {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::InvalidPrice { .. } => {
                Self::destructive("Invalid Price", "This album does not have a valid price.")
            }
            EngineError::InvalidBidFormat { .. } => {
                Self::destructive("Invalid Bid", "Please enter a valid number")
            }
            EngineError::BidCeilingExceeded { maximum, .. } => {
                Self::destructive("Bid Too High", format!("Maximum bid amount is ${maximum}"))
            }
            EngineError::BidTooLow {
                current_price,
                minimum,
                ..
            } => Self::destructive(
                "Invalid Bid",
                format!(
                    "Your bid must be higher than the current price of ${current_price}. Minimum bid: ${minimum}"
                ),
            ),
            EngineError::ValidationIncomplete { missing, .. } => Self::destructive(
                "Missing Information",
                format!("Please fill in: {}", missing.join(", ")),
            ),
            EngineError::PublishNotReady { .. } => Self::destructive(
                "Not Ready to Publish",
                "Review your listing before publishing it.",
            ),
            EngineError::EmptyCart => Self::destructive(
                "Cart is Empty",
                "Add some albums to your cart before checking out.",
            ),
            EngineError::BidNotFound(id) => {
                Self::destructive("Bid Not Found", format!("No bid with id {id}"))
            }
            EngineError::Storage(_) | EngineError::Core(_) | EngineError::Config(_) => {
                Self::destructive("Something Went Wrong", err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cratedigger_core::WizardStep;

    use super::*;

    #[test]
    fn bid_too_low_carries_minimum() {
        let err = EngineError::BidTooLow {
            amount: 20.0,
            current_price: 25.0,
            minimum: 26.0,
        };
        let feedback = Feedback::from(&err);
        assert_eq!(feedback.variant, FeedbackVariant::Destructive);
        assert!(feedback.description.contains("$26"), "{}", feedback.description);
    }

    #[test]
    fn ceiling_message_names_maximum() {
        let err = EngineError::BidCeilingExceeded {
            amount: 100_000.0,
            maximum: 99_999.0,
        };
        let feedback = Feedback::from(&err);
        assert_eq!(feedback.title, "Bid Too High");
        assert_eq!(feedback.description, "Maximum bid amount is $99999");
    }

    #[test]
    fn validation_lists_missing_fields() {
        let err = EngineError::ValidationIncomplete {
            step: WizardStep::Details,
            missing: vec!["title", "format"],
        };
        assert_eq!(
            err.to_string(),
            "step 1 (details) is incomplete: missing title, format"
        );
        assert_eq!(
            Feedback::from(&err).description,
            "Please fill in: title, format"
        );
    }
}
