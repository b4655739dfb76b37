use tracing::debug;

use crate::errors::CoreError;

use super::traits::PriceProvider;

/// Ordered collection of price providers.
///
/// A lookup asks each provider in registration order and returns the first
/// positive finite quote; later providers only act as fallbacks. The registry is itself a
/// `PriceProvider`, so the ledger never needs to know how many sources
/// sit behind it.
pub struct PriceProviderRegistry {
    providers: Vec<Box<dyn PriceProvider>>,
}

impl PriceProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Register a new price provider (lowest priority so far).
    pub fn register(&mut self, provider: Box<dyn PriceProvider>) {
        self.providers.push(provider);
    }

    /// Names of all registered providers, in lookup order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for PriceProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PriceProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceProviderRegistry")
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl PriceProvider for PriceProviderRegistry {
    fn name(&self) -> &str {
        "PriceProviderRegistry"
    }

    fn get_price(&self, symbol: &str) -> Result<f64, CoreError> {
        for provider in &self.providers {
            match provider.get_price(symbol) {
                Ok(price) if price.is_finite() && price > 0.0 => return Ok(price),
                Ok(price) => {
                    debug!(provider = provider.name(), symbol, price, "unusable quote, trying next");
                }
                Err(e) => {
                    debug!(provider = provider.name(), symbol, error = %e, "price provider failed, trying next");
                }
            }
        }
        Err(CoreError::UnknownSymbol(symbol.to_string()))
    }
}
