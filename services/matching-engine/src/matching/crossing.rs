//! Crossing detection
//!
//! Decides whether an incoming order is willing to trade at a resting
//! level's price.

use lob_types::{Order, Price, Side};

/// True when the incoming order crosses a resting level at
/// `resting_price`.
///
/// Market orders always cross. A limit buy crosses any ask at or below
/// its price; a limit sell crosses any bid at or above its price.
pub fn crosses(incoming: &Order, resting_price: Price) -> bool {
    if incoming.is_market() {
        return true;
    }
    match incoming.side {
        Side::Buy => incoming.price >= resting_price,
        Side::Sell => incoming.price <= resting_price,
    }
}
