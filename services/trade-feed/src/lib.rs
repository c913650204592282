//! Trade feed
//!
//! Publishing sink for trades produced by the matching engine: a
//! line-oriented wire format and a UDP pub/sub style publisher. The
//! book hands back trades as plain values; this crate is the only
//! place they leave the process.

pub mod publisher;
pub mod wire;

pub use publisher::{MemorySink, TradeSink, UdpPublisher};
