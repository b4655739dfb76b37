use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of an account's value at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: String,

    pub owner_name: String,

    /// Currency label for all monetary values
    pub currency: String,

    /// When this summary was computed
    pub as_of: DateTime<Utc>,

    /// Uninvested cash
    pub cash_balance: f64,

    /// Market value of all priced holdings
    pub portfolio_value: f64,

    /// cash_balance + portfolio_value
    pub total_value: f64,

    /// Cumulative deposits (the cost basis)
    pub total_deposited: f64,

    /// total_value - total_deposited
    pub profit_loss: f64,

    /// (profit_loss / total_deposited) * 100, or 0 when nothing was deposited
    pub return_pct: f64,

    /// Number of recorded transactions
    pub transaction_count: usize,

    /// Per-symbol breakdown, sorted by symbol
    pub holdings: Vec<HoldingSummary>,
}

/// Summary of a single held symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingSummary {
    pub symbol: String,

    pub quantity: u64,

    /// Current unit price, `None` when no provider can quote the symbol
    pub current_price: Option<f64>,

    /// current_price * quantity, `None` when unpriced
    pub current_value: Option<f64>,

    /// This holding's share of the portfolio value (0 when unpriced)
    pub allocation_pct: f64,
}
