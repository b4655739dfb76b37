use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Cash paid into the account
    Deposit,
    /// Cash taken out of the account
    Withdraw,
    /// Shares purchased with cash
    Buy,
    /// Shares sold for cash
    Sell,
}

impl TransactionKind {
    /// Buy and Sell carry symbol, quantity and price; cash movements don't.
    #[must_use]
    pub fn is_trade(&self) -> bool {
        matches!(self, TransactionKind::Buy | TransactionKind::Sell)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "DEPOSIT"),
            TransactionKind::Withdraw => write!(f, "WITHDRAW"),
            TransactionKind::Buy => write!(f, "BUY"),
            TransactionKind::Sell => write!(f, "SELL"),
        }
    }
}

/// A single entry in the ledger's transaction history.
///
/// Records are created only by the ledger and never modified afterwards.
/// `symbol`, `quantity` and `price_per_share` are `Some` exactly for
/// trades; `total_amount` is the cash moved and is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// When the transaction was recorded
    pub timestamp: DateTime<Utc>,

    /// Deposit, Withdraw, Buy or Sell
    pub kind: TransactionKind,

    /// Uppercased ticker symbol (trades only)
    pub symbol: Option<String>,

    /// Number of shares (trades only)
    pub quantity: Option<u64>,

    /// Unit price at execution (trades only)
    pub price_per_share: Option<f64>,

    /// Cash moved by this transaction
    pub total_amount: f64,
}

impl Transaction {
    /// A deposit or withdrawal.
    pub(crate) fn cash(kind: TransactionKind, amount: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            kind,
            symbol: None,
            quantity: None,
            price_per_share: None,
            total_amount: amount,
        }
    }

    /// A buy or sell of `quantity` shares of an already-normalized symbol.
    pub(crate) fn trade(
        kind: TransactionKind,
        symbol: String,
        quantity: u64,
        price_per_share: f64,
        total_amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            kind,
            symbol: Some(symbol),
            quantity: Some(quantity),
            price_per_share: Some(price_per_share),
            total_amount,
        }
    }
}
