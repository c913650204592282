//! Trade records
//!
//! A trade is the immutable record of one fill between a buy order and
//! a sell order. One incoming order can generate several trades as it
//! walks the opposite ladder.

use crate::ids::{OrderId, TradeId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use crate::time::now_nanos;
use serde::{Deserialize, Serialize};

/// An executed fill.
///
/// `buy_order_id` always names the Buy-side order and `sell_order_id`
/// the Sell-side order, regardless of which side was the aggressor.
/// The execution price is always the resting order's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub symbol: String,
    pub price: Price,
    pub quantity: Quantity,
    /// Unix nanos at execution.
    pub executed_at: i64,
    /// The side of the incoming (liquidity-taking) order.
    pub aggressor_side: Side,
}

impl Trade {
    pub fn new(
        id: TradeId,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        symbol: impl Into<String>,
        price: Price,
        quantity: Quantity,
        aggressor_side: Side,
    ) -> Self {
        Self {
            id,
            buy_order_id,
            sell_order_id,
            symbol: symbol.into(),
            price,
            quantity,
            executed_at: now_nanos(),
            aggressor_side,
        }
    }

    /// The incoming order's id.
    pub fn aggressor_order_id(&self) -> OrderId {
        match self.aggressor_side {
            Side::Buy => self.buy_order_id,
            Side::Sell => self.sell_order_id,
        }
    }

    /// The resting order's id.
    pub fn passive_order_id(&self) -> OrderId {
        match self.aggressor_side {
            Side::Buy => self.sell_order_id,
            Side::Sell => self.buy_order_id,
        }
    }

    /// Traded value in raw fixed-point price units.
    pub fn notional(&self) -> i64 {
        self.price.raw() * self.quantity.get() as i64
    }
}
