//! Order lifecycle types
//!
//! An order is created by the caller and handed to the book. On
//! admission it is either rejected, fully matched, partially matched
//! and rested (limit only), or rested untouched. Terminal states
//! (Filled, Cancelled, Rejected) are sticky.

use crate::errors::RejectReason;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use crate::time::now_nanos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (bid or ask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order matches against.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Execution style.
///
/// Limit executes at the given price or better; Market executes
/// immediately at whatever the opposite ladder offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit,
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
        }
    }
}

/// Lifecycle states.
///
/// ```text
/// New -> PartiallyFilled -> Filled
/// New -> Filled
/// New | PartiallyFilled -> Cancelled
/// New -> Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::New => "NEW",
            OrderStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Rejected => "REJECTED",
        };
        write!(f, "{s}")
    }
}

/// A request to buy or sell, with its fill progress.
///
/// Invariant: `filled <= quantity`; `remaining() = quantity - filled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub filled: Quantity,
    /// Limit price; `Price::INVALID` for market orders.
    pub price: Price,
    pub status: OrderStatus,
    /// Unix nanos at creation.
    pub created_at: i64,
}

impl Order {
    pub fn new(
        id: OrderId,
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            filled: Quantity::ZERO,
            price,
            status: OrderStatus::New,
            created_at: now_nanos(),
        }
    }

    /// Convenience constructor for a limit order.
    pub fn limit(
        id: OrderId,
        symbol: impl Into<String>,
        side: Side,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self::new(id, symbol, side, OrderType::Limit, quantity, price)
    }

    /// Convenience constructor for a market order (no price).
    pub fn market(id: OrderId, symbol: impl Into<String>, side: Side, quantity: Quantity) -> Self {
        Self::new(id, symbol, side, OrderType::Market, quantity, Price::INVALID)
    }

    pub fn remaining(&self) -> Quantity {
        self.quantity - self.filled
    }

    pub fn is_limit(&self) -> bool {
        self.order_type == OrderType::Limit
    }

    pub fn is_market(&self) -> bool {
        self.order_type == OrderType::Market
    }

    pub fn is_filled(&self) -> bool {
        self.filled == self.quantity
    }

    /// Active orders are the ones resting on (or eligible for) the book.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::New | OrderStatus::PartiallyFilled
        )
    }

    /// Apply an execution of up to `qty`, returning the amount actually
    /// filled (`min(qty, remaining)`). Never reduces `filled`; a zero
    /// fill is a no-op.
    pub fn fill(&mut self, qty: Quantity) -> Quantity {
        let applied = qty.min(self.remaining());
        self.filled += applied;

        if self.remaining().is_zero() {
            self.status = OrderStatus::Filled;
        } else if !self.filled.is_zero() {
            self.status = OrderStatus::PartiallyFilled;
        }

        applied
    }

    /// Transition an active order to Cancelled. Returns false (and
    /// leaves the order untouched) for any other status.
    pub fn cancel(&mut self) -> bool {
        if self.is_active() {
            self.status = OrderStatus::Cancelled;
            true
        } else {
            false
        }
    }

    /// Admission validation. Market orders may carry no price.
    pub fn validate(&self) -> Result<(), RejectReason> {
        if self.quantity.is_zero() {
            return Err(RejectReason::InvalidQuantity);
        }
        if self.is_limit() && !self.price.is_valid() {
            return Err(RejectReason::InvalidPrice);
        }
        if self.symbol.is_empty() {
            return Err(RejectReason::InvalidSymbol);
        }
        Ok(())
    }
}
