//! Wire encoding for published trades
//!
//! One trade per line, space-separated key=value pairs, prices
//! rendered at six-decimal scale:
//!
//! ```text
//! symbol=AAPL price=101.000000 qty=100 buy=1 sell=2
//! ```

use lob_types::Trade;

/// Render a trade as its wire line.
pub fn encode(trade: &Trade) -> String {
    format!(
        "symbol={} price={} qty={} buy={} sell={}",
        trade.symbol, trade.price, trade.quantity, trade.buy_order_id, trade.sell_order_id
    )
}
