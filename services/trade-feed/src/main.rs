//! Demo wiring: book in, trades out over the feed.

use std::env;

use lob_types::{Order, OrderId, Price, Quantity, Side};
use matching_engine::OrderBook;
use trade_feed::{wire, TradeSink, UdpPublisher};

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let dest = env::var("TRADE_FEED_ADDR").unwrap_or_else(|_| "127.0.0.1:9400".to_string());
    let channel = env::var("TRADE_FEED_CHANNEL").unwrap_or_else(|_| "trades".to_string());

    let mut publisher = UdpPublisher::new(&dest, channel)?;
    tracing::info!(dest = %dest, channel = %publisher.channel(), "trade feed up");

    let mut book = OrderBook::new("AAPL");

    // Resting sell: 100 shares @ $101.00
    let mut sell = Order::limit(
        OrderId::new(1),
        "AAPL",
        Side::Sell,
        Quantity::new(100),
        Price::from_f64(101.0),
    );
    book.add_order(&mut sell);
    tracing::info!("added SELL 100 @ 101.000000 (resting)");

    // Aggressive buy crosses the spread and triggers a match
    let mut buy = Order::limit(
        OrderId::new(2),
        "AAPL",
        Side::Buy,
        Quantity::new(100),
        Price::from_f64(102.0),
    );
    let trades = book.add_order(&mut buy);
    tracing::info!("added BUY 100 @ 102.000000 (crosses spread)");

    for trade in &trades {
        publisher.publish(trade);
        tracing::info!(line = %wire::encode(trade), "published trade");
    }

    Ok(())
}
