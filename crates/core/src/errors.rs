use thiserror::Error;

/// Unified error type for the entire paper-ledger-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    // ── Trading rules ───────────────────────────────────────────────
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Insufficient funds: requested {requested:.2}, current balance {balance:.2}")]
    InsufficientFunds { requested: f64, balance: f64 },

    #[error("Cannot sell {requested} shares of {symbol}: only {owned} shares owned")]
    InsufficientShares {
        symbol: String,
        requested: u64,
        owned: u64,
    },

    // ── Pricing ─────────────────────────────────────────────────────
    #[error("No price data found for symbol: {0}")]
    UnknownSymbol(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// True for errors caused by a rejected trade or cash movement
    /// (bad input, business rule or unpriced symbol), as opposed to
    /// configuration problems.
    #[must_use]
    pub fn is_trading_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidAmount(_)
                | CoreError::InvalidQuantity(_)
                | CoreError::InsufficientFunds { .. }
                | CoreError::InsufficientShares { .. }
                | CoreError::UnknownSymbol(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
