//! Error taxonomy for the order book
//!
//! All failures are typed values surfaced at the immediate caller
//! boundary; nothing in the core panics, retries, or logs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an incoming order failed admission validation.
///
/// Reported through the order's `Rejected` status together with an
/// empty trade list; the book itself is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// Original quantity is zero.
    #[error("order quantity must be positive")]
    InvalidQuantity,

    /// Limit order with a non-positive price.
    #[error("limit price must be positive")]
    InvalidPrice,

    /// Empty instrument symbol.
    #[error("order symbol is empty")]
    InvalidSymbol,
}

/// Why a cancel request failed.
///
/// The already-terminal variants cannot be hit while the id index
/// stays consistent with order status: filled and cancelled orders
/// leave the index on the mutation that terminates them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelError {
    /// No active order with that id.
    #[error("order not found")]
    OrderNotFound,

    #[error("order already cancelled")]
    AlreadyCancelled,

    #[error("order already filled")]
    AlreadyFilled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reason_display() {
        assert_eq!(
            RejectReason::InvalidQuantity.to_string(),
            "order quantity must be positive"
        );
        assert_eq!(
            RejectReason::InvalidPrice.to_string(),
            "limit price must be positive"
        );
    }

    #[test]
    fn test_cancel_error_display() {
        assert_eq!(CancelError::OrderNotFound.to_string(), "order not found");
    }

    #[test]
    fn test_error_serialization() {
        let json = serde_json::to_string(&RejectReason::InvalidPrice).unwrap();
        assert_eq!(json, "\"INVALID_PRICE\"");
        let json = serde_json::to_string(&CancelError::AlreadyFilled).unwrap();
        assert_eq!(json, "\"ALREADY_FILLED\"");
    }
}
