use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;

/// User-configurable settings for a trading desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency label attached to every summary (e.g., "USD", "EUR").
    pub default_currency: String,

    /// Prices that replace or extend the built-in simulated market.
    /// Keys: ticker symbol (any case). Values: price per share.
    #[serde(default)]
    pub price_overrides: HashMap<String, f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            price_overrides: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them.
    /// Missing `price_overrides` defaults to empty.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.default_currency = settings.default_currency.trim().to_uppercase();
        settings.validate()?;
        Ok(settings)
    }

    /// Check the currency code and every price override.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_currency(&self.default_currency)?;
        for (symbol, price) in &self.price_overrides {
            if !(price.is_finite() && *price > 0.0) {
                return Err(CoreError::ValidationError(format!(
                    "Price override for '{symbol}' must be a positive number, got {price}"
                )));
            }
        }
        Ok(())
    }
}

/// Currency code must be a 3-letter alphabetic string.
pub(crate) fn validate_currency(currency: &str) -> Result<(), CoreError> {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::ValidationError(format!(
            "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)"
        )));
    }
    Ok(())
}
