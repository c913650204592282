//! Bid (buy-side) ladder
//!
//! Price levels sorted so the best bid is the highest price. BTreeMap
//! keeps iteration deterministic; the best level is the last key.
//! Empty levels are pruned by the engine on the mutation that empties
//! them, so every level present holds at least one order.

use std::collections::BTreeMap;

use lob_types::{Price, Quantity};

use super::price_level::PriceLevel;

/// Buy-side ladder: best bid first.
#[derive(Debug, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Highest bid price, if any.
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    pub fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    pub fn level_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Level at `price`, created empty if absent.
    pub fn level_entry(&mut self, price: Price) -> &mut PriceLevel {
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
    }

    pub fn remove_level(&mut self, price: Price) {
        self.levels.remove(&price);
    }

    /// Aggregate resting quantity at `price`, zero if no level.
    pub fn volume_at(&self, price: Price) -> Quantity {
        self.levels
            .get(&price)
            .map(PriceLevel::total_quantity)
            .unwrap_or(Quantity::ZERO)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels in priority order (highest price first).
    pub fn iter(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }

    /// Top-N (price, aggregate quantity) pairs, best first.
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.iter()
            .take(depth)
            .map(|(price, level)| (price, level.total_quantity()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::arena::OrderArena;
    use lob_types::{Order, OrderId, Side};

    fn rest(book: &mut BidBook, arena: &mut OrderArena, id: u64, qty: u64, price: f64) {
        let price = Price::from_f64(price);
        let handle = arena.insert(Order::limit(
            OrderId::new(id),
            "AAPL",
            Side::Buy,
            Quantity::new(qty),
            price,
        ));
        book.level_entry(price).push_back(arena, handle);
    }

    #[test]
    fn test_best_is_highest_price() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        rest(&mut book, &mut arena, 1, 100, 148.0);
        rest(&mut book, &mut arena, 2, 100, 150.0);
        rest(&mut book, &mut arena, 3, 100, 149.0);

        assert_eq!(book.best_price(), Some(Price::from_f64(150.0)));
        assert_eq!(book.level_count(), 3);
    }

    #[test]
    fn test_iter_descends_strictly() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        rest(&mut book, &mut arena, 1, 100, 148.0);
        rest(&mut book, &mut arena, 2, 100, 150.0);
        rest(&mut book, &mut arena, 3, 100, 149.0);

        let prices: Vec<Price> = book.iter().map(|(price, _)| price).collect();
        assert_eq!(
            prices,
            vec![
                Price::from_f64(150.0),
                Price::from_f64(149.0),
                Price::from_f64(148.0)
            ]
        );
    }

    #[test]
    fn test_volume_at_aggregates_level() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        rest(&mut book, &mut arena, 1, 100, 150.0);
        rest(&mut book, &mut arena, 2, 50, 150.0);

        assert_eq!(book.volume_at(Price::from_f64(150.0)), Quantity::new(150));
        assert_eq!(book.volume_at(Price::from_f64(151.0)), Quantity::ZERO);
    }

    #[test]
    fn test_remove_level() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        rest(&mut book, &mut arena, 1, 100, 150.0);
        book.remove_level(Price::from_f64(150.0));

        assert!(book.is_empty());
        assert_eq!(book.best_price(), None);
    }

    #[test]
    fn test_depth_snapshot_best_first() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        rest(&mut book, &mut arena, 1, 100, 148.0);
        rest(&mut book, &mut arena, 2, 200, 150.0);
        rest(&mut book, &mut arena, 3, 50, 149.0);

        let depth = book.depth_snapshot(2);
        assert_eq!(
            depth,
            vec![
                (Price::from_f64(150.0), Quantity::new(200)),
                (Price::from_f64(149.0), Quantity::new(50)),
            ]
        );
    }
}
