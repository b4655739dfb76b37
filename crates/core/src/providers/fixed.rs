use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::errors::CoreError;

use super::traits::{normalize_symbol, PriceProvider};

/// Prices the simulated market starts with.
pub const DEFAULT_PRICES: [(&str, f64); 3] = [("AAPL", 150.00), ("GOOGL", 2750.00), ("TSLA", 700.50)];

/// In-memory price table standing in for a market data feed.
///
/// Prices can be changed through a shared reference, so a table held
/// inside a registry (behind `Arc`) can still be moved to simulate the
/// market going up or down.
#[derive(Debug, Default)]
pub struct FixedPriceTable {
    prices: RwLock<HashMap<String, f64>>,
}

impl FixedPriceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table seeded with `DEFAULT_PRICES`.
    pub fn with_defaults() -> Self {
        let prices = DEFAULT_PRICES
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), *price))
            .collect();
        Self {
            prices: RwLock::new(prices),
        }
    }

    /// Set (or add) the price of a symbol. Price must be positive and finite.
    pub fn set_price(&self, symbol: &str, price: f64) -> Result<(), CoreError> {
        if !(price.is_finite() && price > 0.0) {
            return Err(CoreError::ValidationError(format!(
                "Price for '{symbol}' must be a positive number, got {price}"
            )));
        }
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(normalize_symbol(symbol), price);
        Ok(())
    }

    /// Remove a symbol from the table. Returns the price it had, if any.
    pub fn remove_price(&self, symbol: &str) -> Option<f64> {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&normalize_symbol(symbol))
    }

    /// All quoted symbols, sorted.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self
            .prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        symbols.sort();
        symbols
    }
}

impl PriceProvider for FixedPriceTable {
    fn name(&self) -> &str {
        "FixedPriceTable"
    }

    fn get_price(&self, symbol: &str) -> Result<f64, CoreError> {
        self.prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&normalize_symbol(symbol))
            .copied()
            .ok_or_else(|| CoreError::UnknownSymbol(symbol.to_string()))
    }
}
