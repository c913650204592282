//! Order book infrastructure
//!
//! The order arena (stable storage for resting orders), the per-price
//! FIFO level, and the two sorted ladders.

pub mod arena;
pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use arena::{OrderArena, OrderHandle};
pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;
