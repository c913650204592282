//! End-to-end matching scenarios on a fresh book.

use lob_types::{CancelError, Order, OrderId, OrderStatus, Price, Quantity, Side};
use matching_engine::OrderBook;

fn limit_buy(id: u64, qty: u64, price: f64) -> Order {
    Order::limit(
        OrderId::new(id),
        "AAPL",
        Side::Buy,
        Quantity::new(qty),
        Price::from_f64(price),
    )
}

fn limit_sell(id: u64, qty: u64, price: f64) -> Order {
    Order::limit(
        OrderId::new(id),
        "AAPL",
        Side::Sell,
        Quantity::new(qty),
        Price::from_f64(price),
    )
}

#[test]
fn exact_match_empties_the_book() {
    let mut book = OrderBook::new("AAPL");
    book.add_order(&mut limit_sell(1, 100, 150.0));

    let mut buy = limit_buy(2, 100, 150.0);
    let trades = book.add_order(&mut buy);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity, Quantity::new(100));
    assert_eq!(trades[0].price, Price::from_f64(150.0));
    assert_eq!(trades[0].symbol, "AAPL");
    assert!(book.is_empty());
    assert_eq!(book.bid_levels(), 0);
    assert_eq!(book.ask_levels(), 0);
}

#[test]
fn aggressive_buy_gets_price_improvement() {
    let mut book = OrderBook::new("AAPL");
    book.add_order(&mut limit_sell(1, 100, 150.0));

    let mut buy = limit_buy(2, 100, 151.0);
    let trades = book.add_order(&mut buy);

    assert_eq!(trades.len(), 1);
    // Prints at the resting price, not the aggressor's
    assert_eq!(trades[0].price, Price::from_f64(150.0));
    assert!(book.is_empty());
}

#[test]
fn buy_sweeps_multiple_levels_in_price_order() {
    let mut book = OrderBook::new("AAPL");
    book.add_order(&mut limit_sell(1, 50, 150.0));
    book.add_order(&mut limit_sell(2, 50, 151.0));
    book.add_order(&mut limit_sell(3, 50, 152.0));

    let mut buy = limit_buy(4, 120, 152.0);
    let trades = book.add_order(&mut buy);

    assert_eq!(trades.len(), 3);
    assert_eq!(
        (trades[0].quantity, trades[0].price),
        (Quantity::new(50), Price::from_f64(150.0))
    );
    assert_eq!(
        (trades[1].quantity, trades[1].price),
        (Quantity::new(50), Price::from_f64(151.0))
    );
    assert_eq!(
        (trades[2].quantity, trades[2].price),
        (Quantity::new(20), Price::from_f64(152.0))
    );

    assert_eq!(buy.status, OrderStatus::Filled);
    assert_eq!(
        book.volume_at_price(Side::Sell, Price::from_f64(152.0)),
        Quantity::new(30)
    );
    assert_eq!(book.ask_levels(), 1);
}

#[test]
fn partial_fill_rests_the_remainder() {
    let mut book = OrderBook::new("AAPL");
    book.add_order(&mut limit_sell(1, 60, 150.0));

    let mut buy = limit_buy(2, 100, 150.0);
    let trades = book.add_order(&mut buy);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity, Quantity::new(60));
    assert_eq!(buy.status, OrderStatus::PartiallyFilled);
    assert_eq!(buy.remaining(), Quantity::new(40));

    assert_eq!(book.best_bid(), Some(Price::from_f64(150.0)));
    let resting = book.order(OrderId::new(2)).expect("remainder should rest");
    assert_eq!(resting.status, OrderStatus::PartiallyFilled);
    assert_eq!(resting.remaining(), Quantity::new(40));
}

#[test]
fn fifo_priority_within_a_level() {
    let mut book = OrderBook::new("AAPL");
    book.add_order(&mut limit_sell(1, 50, 150.0)); // s1, first in
    book.add_order(&mut limit_sell(2, 50, 150.0)); // s2, second in

    let mut buy = limit_buy(3, 50, 150.0);
    let trades = book.add_order(&mut buy);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].sell_order_id, OrderId::new(1));
    assert_eq!(trades[0].buy_order_id, OrderId::new(3));
    assert_eq!(trades[0].aggressor_side, Side::Buy);

    // s2 is untouched and still queued
    let s2 = book.order(OrderId::new(2)).expect("s2 still resting");
    assert_eq!(s2.remaining(), Quantity::new(50));
    assert_eq!(s2.status, OrderStatus::New);
}

#[test]
fn market_order_on_empty_book_is_discarded() {
    let mut book = OrderBook::new("AAPL");

    let mut market = Order::market(OrderId::new(1), "AAPL", Side::Buy, Quantity::new(100));
    let trades = book.add_order(&mut market);

    assert!(trades.is_empty());
    assert!(book.is_empty());
    assert_eq!(market.remaining(), Quantity::new(100));
}

#[test]
fn cancel_then_cancel_again() {
    let mut book = OrderBook::new("AAPL");
    book.add_order(&mut limit_buy(1, 100, 150.0));

    assert_eq!(book.cancel_order(OrderId::new(1)), Ok(()));
    assert_eq!(book.best_bid(), None);
    assert_eq!(book.order_count(), 0);

    assert_eq!(
        book.cancel_order(OrderId::new(1)),
        Err(CancelError::OrderNotFound)
    );
}

#[test]
fn sell_aggressor_sweeps_bids() {
    let mut book = OrderBook::new("AAPL");
    book.add_order(&mut limit_buy(1, 40, 151.0));
    book.add_order(&mut limit_buy(2, 40, 150.0));

    let mut sell = limit_sell(3, 60, 150.0);
    let trades = book.add_order(&mut sell);

    // Best bid first, then the next level down
    assert_eq!(trades.len(), 2);
    assert_eq!(
        (trades[0].quantity, trades[0].price),
        (Quantity::new(40), Price::from_f64(151.0))
    );
    assert_eq!(
        (trades[1].quantity, trades[1].price),
        (Quantity::new(20), Price::from_f64(150.0))
    );
    assert_eq!(trades[0].aggressor_side, Side::Sell);
    assert_eq!(trades[0].sell_order_id, OrderId::new(3));
    assert_eq!(trades[0].buy_order_id, OrderId::new(1));

    assert_eq!(sell.status, OrderStatus::Filled);
    assert_eq!(
        book.volume_at_price(Side::Buy, Price::from_f64(150.0)),
        Quantity::new(20)
    );
}

#[test]
fn conservation_across_one_admission() {
    let mut book = OrderBook::new("AAPL");
    book.add_order(&mut limit_sell(1, 30, 150.0));
    book.add_order(&mut limit_sell(2, 45, 150.5));
    book.add_order(&mut limit_sell(3, 25, 151.0));

    let mut buy = limit_buy(4, 80, 151.0);
    let initial = buy.quantity;
    let trades = book.add_order(&mut buy);

    let traded: u64 = trades.iter().map(|t| t.quantity.get()).sum();
    assert_eq!(traded + buy.remaining().get(), initial.get());
}

#[test]
fn add_then_cancel_restores_structure() {
    let mut book = OrderBook::new("AAPL");
    book.add_order(&mut limit_buy(1, 100, 149.0));
    book.add_order(&mut limit_sell(2, 100, 152.0));

    let bid_levels = book.bid_levels();
    let ask_levels = book.ask_levels();
    let count = book.order_count();

    book.add_order(&mut limit_buy(3, 70, 150.0));
    assert_eq!(book.cancel_order(OrderId::new(3)), Ok(()));

    assert_eq!(book.bid_levels(), bid_levels);
    assert_eq!(book.ask_levels(), ask_levels);
    assert_eq!(book.order_count(), count);
    assert_eq!(book.best_bid(), Some(Price::from_f64(149.0)));
    assert_eq!(book.best_ask(), Some(Price::from_f64(152.0)));
}
