//! Trade construction
//!
//! Owns the book-local trade-id counter and builds trade records with
//! the buy/sell identifiers oriented by side.

use lob_types::{OrderId, Price, Quantity, Side, Trade, TradeId};

/// Assigns monotone trade ids (starting at 1) and emits trade records.
#[derive(Debug, Default)]
pub struct TradeExecutor {
    last_trade_id: u64,
}

impl TradeExecutor {
    pub fn new() -> Self {
        Self { last_trade_id: 0 }
    }

    fn next_trade_id(&mut self) -> TradeId {
        self.last_trade_id += 1;
        TradeId::new(self.last_trade_id)
    }

    /// Record one fill between the incoming aggressor and a resting
    /// order. `price` is the resting level's price; the buy identifier
    /// always names the Buy-side order.
    pub fn execute(
        &mut self,
        symbol: &str,
        aggressor_side: Side,
        aggressor_id: OrderId,
        resting_id: OrderId,
        price: Price,
        quantity: Quantity,
    ) -> Trade {
        let (buy_order_id, sell_order_id) = match aggressor_side {
            Side::Buy => (aggressor_id, resting_id),
            Side::Sell => (resting_id, aggressor_id),
        };

        Trade::new(
            self.next_trade_id(),
            buy_order_id,
            sell_order_id,
            symbol,
            price,
            quantity,
            aggressor_side,
        )
    }
}
