use std::sync::Arc;

use crate::errors::CoreError;

/// Trait abstraction for all share price sources.
///
/// The ledger only ever asks for "the price of this symbol right now".
/// Lookups are case-insensitive and synchronous; a symbol without a price
/// is reported as `CoreError::UnknownSymbol`.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Get the current price per share of `symbol`.
    fn get_price(&self, symbol: &str) -> Result<f64, CoreError>;
}

impl<P: PriceProvider + ?Sized> PriceProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get_price(&self, symbol: &str) -> Result<f64, CoreError> {
        (**self).get_price(symbol)
    }
}

impl<P: PriceProvider + ?Sized> PriceProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get_price(&self, symbol: &str) -> Result<f64, CoreError> {
        (**self).get_price(symbol)
    }
}

/// Uppercase storage/lookup key for a ticker symbol.
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.to_uppercase()
}
