//! The order book and its matching loop
//!
//! Price-time priority matching for a single instrument. An incoming
//! order is validated, matched against the opposite ladder best level
//! first and FIFO within a level, and any limit remainder is rested on
//! its own side. Three structures are kept mutually consistent on
//! every mutation: the two ladders, the order arena, and the
//! id-to-location index that makes cancel O(1).
//!
//! Complexity: add is O(log n + fills), cancel is O(1) plus a possible
//! level erase, best bid/ask are O(log n) map lookups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lob_types::{
    CancelError, Order, OrderId, OrderStatus, Price, Quantity, Side, Trade,
};

use crate::book::arena::{OrderArena, OrderHandle};
use crate::book::price_level::PriceLevel;
use crate::book::{AskBook, BidBook};
use crate::matching::{crossing, TradeExecutor};

/// Where a resting order lives, for O(1) cancel.
#[derive(Debug, Clone, Copy)]
struct OrderLocation {
    side: Side,
    price: Price,
    handle: OrderHandle,
}

/// Single-instrument limit order book with embedded matching engine.
///
/// Not safe for concurrent mutation; an external serializer must feed
/// one thread per book instance.
pub struct OrderBook {
    symbol: String,
    bids: BidBook,
    asks: AskBook,
    arena: OrderArena,
    index: HashMap<OrderId, OrderLocation>,
    executor: TradeExecutor,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: BidBook::new(),
            asks: AskBook::new(),
            arena: OrderArena::new(),
            index: HashMap::new(),
            executor: TradeExecutor::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Admit an order: validate, match, rest any limit remainder.
    ///
    /// Returns the trades generated, in execution order. A rejected
    /// order gets `Rejected` status and an empty list, with no book
    /// mutation. A market order's unfilled remainder is abandoned
    /// silently; callers read the order's remaining/status.
    pub fn add_order(&mut self, order: &mut Order) -> Vec<Trade> {
        let mut trades = Vec::new();

        if order.validate().is_err() {
            order.status = OrderStatus::Rejected;
            return trades;
        }

        match order.side {
            Side::Buy => Self::match_against_asks(
                &mut self.asks,
                &mut self.arena,
                &mut self.index,
                &mut self.executor,
                &self.symbol,
                order,
                &mut trades,
            ),
            Side::Sell => Self::match_against_bids(
                &mut self.bids,
                &mut self.arena,
                &mut self.index,
                &mut self.executor,
                &self.symbol,
                order,
                &mut trades,
            ),
        }

        if order.is_limit() && !order.remaining().is_zero() {
            self.rest(order);
        }

        trades
    }

    /// Cancel a resting order by id.
    ///
    /// The terminal-status arms are unreachable while the index stays
    /// consistent with order status; filled and cancelled orders leave
    /// the index on the mutation that terminates them.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Result<(), CancelError> {
        let location = *self
            .index
            .get(&order_id)
            .ok_or(CancelError::OrderNotFound)?;

        match self.arena.node(location.handle).order.status {
            OrderStatus::Cancelled => return Err(CancelError::AlreadyCancelled),
            OrderStatus::Filled => return Err(CancelError::AlreadyFilled),
            _ => {}
        }

        self.arena.order_mut(location.handle).cancel();
        self.remove_from_book(&location);
        self.index.remove(&order_id);
        self.arena.remove(location.handle);
        Ok(())
    }

    /// Walk the ask ladder with an incoming buy.
    fn match_against_asks(
        asks: &mut AskBook,
        arena: &mut OrderArena,
        index: &mut HashMap<OrderId, OrderLocation>,
        executor: &mut TradeExecutor,
        symbol: &str,
        incoming: &mut Order,
        trades: &mut Vec<Trade>,
    ) {
        loop {
            if incoming.remaining().is_zero() {
                break;
            }
            let Some(best_price) = asks.best_price() else {
                break;
            };
            if !crossing::crosses(incoming, best_price) {
                break;
            }

            let emptied = {
                let Some(level) = asks.level_mut(best_price) else {
                    break;
                };
                Self::drain_level(level, best_price, arena, index, executor, symbol, incoming, trades);
                level.is_empty()
            };
            if emptied {
                asks.remove_level(best_price);
            }
        }
    }

    /// Walk the bid ladder with an incoming sell.
    fn match_against_bids(
        bids: &mut BidBook,
        arena: &mut OrderArena,
        index: &mut HashMap<OrderId, OrderLocation>,
        executor: &mut TradeExecutor,
        symbol: &str,
        incoming: &mut Order,
        trades: &mut Vec<Trade>,
    ) {
        loop {
            if incoming.remaining().is_zero() {
                break;
            }
            let Some(best_price) = bids.best_price() else {
                break;
            };
            if !crossing::crosses(incoming, best_price) {
                break;
            }

            let emptied = {
                let Some(level) = bids.level_mut(best_price) else {
                    break;
                };
                Self::drain_level(level, best_price, arena, index, executor, symbol, incoming, trades);
                level.is_empty()
            };
            if emptied {
                bids.remove_level(best_price);
            }
        }
    }

    /// Consume one level in FIFO order until the incoming order or the
    /// level is exhausted. Trades print at the level's price.
    #[allow(clippy::too_many_arguments)]
    fn drain_level(
        level: &mut PriceLevel,
        level_price: Price,
        arena: &mut OrderArena,
        index: &mut HashMap<OrderId, OrderLocation>,
        executor: &mut TradeExecutor,
        symbol: &str,
        incoming: &mut Order,
        trades: &mut Vec<Trade>,
    ) {
        while !incoming.remaining().is_zero() {
            let Some(handle) = level.front() else {
                break;
            };

            let (resting_id, fill_qty, resting_filled) = {
                let resting = arena.order_mut(handle);
                let fill_qty = incoming.remaining().min(resting.remaining());
                incoming.fill(fill_qty);
                resting.fill(fill_qty);
                (resting.id, fill_qty, resting.is_filled())
            };

            // Keep the cached aggregate true across the inner loop
            level.reduce_total(fill_qty);

            trades.push(executor.execute(
                symbol,
                incoming.side,
                incoming.id,
                resting_id,
                level_price,
                fill_qty,
            ));

            if resting_filled {
                level.unlink(arena, handle);
                index.remove(&resting_id);
                arena.remove(handle);
            }
        }
    }

    /// Park a limit remainder on its own ladder and index it.
    fn rest(&mut self, order: &Order) {
        let handle = self.arena.insert(order.clone());
        let level = match order.side {
            Side::Buy => self.bids.level_entry(order.price),
            Side::Sell => self.asks.level_entry(order.price),
        };
        level.push_back(&mut self.arena, handle);
        self.index.insert(
            order.id,
            OrderLocation {
                side: order.side,
                price: order.price,
                handle,
            },
        );
    }

    /// Unlink from the level and prune the level if that emptied it.
    fn remove_from_book(&mut self, location: &OrderLocation) {
        match location.side {
            Side::Buy => {
                let emptied = match self.bids.level_mut(location.price) {
                    Some(level) => {
                        level.unlink(&mut self.arena, location.handle);
                        level.is_empty()
                    }
                    None => return,
                };
                if emptied {
                    self.bids.remove_level(location.price);
                }
            }
            Side::Sell => {
                let emptied = match self.asks.level_mut(location.price) {
                    Some(level) => {
                        level.unlink(&mut self.arena, location.handle);
                        level.is_empty()
                    }
                    None => return,
                };
                if emptied {
                    self.asks.remove_level(location.price);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Market data queries
    // ------------------------------------------------------------------

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Best ask minus best bid; absent unless both sides are populated.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Aggregate resting quantity at one price, zero if no level.
    pub fn volume_at_price(&self, side: Side, price: Price) -> Quantity {
        match side {
            Side::Buy => self.bids.volume_at(price),
            Side::Sell => self.asks.volume_at(price),
        }
    }

    /// Number of resting (active) orders.
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// A resting order by id, if still active on the book.
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.index
            .get(&order_id)
            .and_then(|location| self.arena.get(location.handle))
    }

    /// Resting orders at one price in FIFO (arrival) order.
    pub fn orders_at_price(&self, side: Side, price: Price) -> Vec<&Order> {
        let level = match side {
            Side::Buy => self.bids.level(price),
            Side::Sell => self.asks.level(price),
        };
        match level {
            Some(level) => level
                .iter(&self.arena)
                .map(|handle| &self.arena.node(handle).order)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Top-of-book snapshot down to `levels` levels per side.
    pub fn depth(&self, levels: usize) -> BookDepth {
        BookDepth {
            symbol: self.symbol.clone(),
            bids: self.bids.depth_snapshot(levels),
            asks: self.asks.depth_snapshot(levels),
        }
    }
}

/// Aggregated depth snapshot for market data consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDepth {
    pub symbol: String,
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}
