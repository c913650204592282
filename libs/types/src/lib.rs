//! Shared value types for the limit order book
//!
//! Fixed-point prices (integer, six fractional decimals), unsigned
//! quantities, u64 identifiers, order/trade lifecycle types, and the
//! error taxonomy. Everything here is a plain value; the matching
//! engine lives in the `matching-engine` crate.

pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod time;
pub mod trade;

pub use errors::{CancelError, RejectReason};
pub use ids::{OrderId, TradeId};
pub use numeric::{Price, Quantity};
pub use order::{Order, OrderStatus, OrderType, Side};
pub use trade::Trade;
