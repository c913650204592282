//! Ask (sell-side) ladder
//!
//! Mirror of the bid ladder with the opposite priority: the best ask
//! is the lowest price, i.e. the first BTreeMap key.

use std::collections::BTreeMap;

use lob_types::{Price, Quantity};

use super::price_level::PriceLevel;

/// Sell-side ladder: best ask first.
#[derive(Debug, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Lowest ask price, if any.
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
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

    /// Levels in priority order (lowest price first).
    pub fn iter(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    /// Top-N (price, aggregate quantity) pairs, best first.
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.iter()
            .take(depth)
            .map(|(price, level)| (price, level.total_quantity()))
            .collect()
    }
}
