use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::transaction::{Transaction, TransactionKind};
use crate::providers::clock::{Clock, SystemClock};
use crate::providers::traits::{normalize_symbol, PriceProvider};

/// One user's simulated brokerage account: cash, share holdings and the
/// full transaction history.
///
/// Every mutation either applies completely and appends exactly one
/// transaction, or returns an error and leaves the ledger untouched.
/// Invariants:
/// - `cash_balance >= 0`
/// - `total_deposited` never decreases
/// - no holding is ever stored with quantity 0
///
/// A ledger has no internal locking; share it behind a mutex if several
/// callers need it.
pub struct Ledger {
    id: String,
    owner_name: String,
    cash_balance: f64,
    total_deposited: f64,
    holdings: HashMap<String, u64>,
    transactions: Vec<Transaction>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("id", &self.id)
            .field("owner_name", &self.owner_name)
            .field("cash_balance", &self.cash_balance)
            .field("total_deposited", &self.total_deposited)
            .field("holdings", &self.holdings)
            .field("transactions", &self.transactions.len())
            .finish()
    }
}

impl Ledger {
    /// Open a ledger timestamped by the system clock.
    pub fn new(
        id: impl Into<String>,
        owner_name: impl Into<String>,
        initial_deposit: f64,
    ) -> Result<Self, CoreError> {
        Self::with_clock(id, owner_name, initial_deposit, Box::new(SystemClock))
    }

    /// Open a ledger with an injected clock.
    /// A positive `initial_deposit` is recorded as the first transaction.
    pub fn with_clock(
        id: impl Into<String>,
        owner_name: impl Into<String>,
        initial_deposit: f64,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CoreError> {
        if initial_deposit.is_nan() || initial_deposit < 0.0 || initial_deposit.is_infinite() {
            return Err(CoreError::InvalidAmount(
                "Initial deposit cannot be negative".into(),
            ));
        }

        let mut ledger = Self {
            id: id.into(),
            owner_name: owner_name.into(),
            cash_balance: initial_deposit,
            total_deposited: initial_deposit,
            holdings: HashMap::new(),
            transactions: Vec::new(),
            clock,
        };

        if initial_deposit > 0.0 {
            let tx = Transaction::cash(TransactionKind::Deposit, initial_deposit, ledger.next_timestamp());
            ledger.transactions.push(tx);
        }
        debug!(account = %ledger.id, initial_deposit, "ledger opened");

        Ok(ledger)
    }

    // ── Cash ────────────────────────────────────────────────────────

    /// Add cash. Counts towards the cost basis.
    pub fn deposit(&mut self, amount: f64) -> Result<(), CoreError> {
        if !is_positive_amount(amount) {
            return Err(CoreError::InvalidAmount(
                "Deposit amount must be a positive number".into(),
            ));
        }
        if !(self.cash_balance + amount).is_finite() || !(self.total_deposited + amount).is_finite() {
            return Err(CoreError::InvalidAmount(
                "Deposit would overflow the account balance".into(),
            ));
        }

        self.cash_balance += amount;
        self.total_deposited += amount;
        self.record(Transaction::cash(TransactionKind::Deposit, amount, self.next_timestamp()));
        debug!(account = %self.id, amount, balance = self.cash_balance, "deposit");
        Ok(())
    }

    /// Take cash out. The cost basis is not reduced.
    pub fn withdraw(&mut self, amount: f64) -> Result<(), CoreError> {
        if !is_positive_amount(amount) {
            return Err(CoreError::InvalidAmount(
                "Withdrawal amount must be a positive number".into(),
            ));
        }
        if amount > self.cash_balance {
            return Err(CoreError::InsufficientFunds {
                requested: amount,
                balance: self.cash_balance,
            });
        }

        self.cash_balance -= amount;
        self.record(Transaction::cash(TransactionKind::Withdraw, amount, self.next_timestamp()));
        debug!(account = %self.id, amount, balance = self.cash_balance, "withdraw");
        Ok(())
    }

    // ── Trading ─────────────────────────────────────────────────────

    /// Buy `quantity` shares of `symbol` at the provider's current price.
    pub fn buy<P: PriceProvider + ?Sized>(
        &mut self,
        prices: &P,
        symbol: &str,
        quantity: u64,
    ) -> Result<(), CoreError> {
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity(
                "Quantity to buy must be a positive integer".into(),
            ));
        }

        let price = quote(prices, symbol)?;
        let cost = price * quantity as f64;
        if cost > self.cash_balance {
            return Err(CoreError::InsufficientFunds {
                requested: cost,
                balance: self.cash_balance,
            });
        }

        let key = normalize_symbol(symbol);
        let held = self
            .get_shares_owned(&key)
            .checked_add(quantity)
            .ok_or_else(|| {
                CoreError::InvalidQuantity(format!(
                    "Buying {quantity} more shares of {key} would overflow the holding"
                ))
            })?;

        self.cash_balance -= cost;
        self.holdings.insert(key.clone(), held);
        debug!(account = %self.id, symbol = %key, quantity, price, cost, "buy");
        let ts = self.next_timestamp();
        self.record(Transaction::trade(TransactionKind::Buy, key, quantity, price, cost, ts));
        Ok(())
    }

    /// Sell `quantity` owned shares of `symbol` at the provider's current price.
    ///
    /// Ownership is checked before any price is requested, so selling
    /// shares that aren't held fails the same way for unknown symbols.
    pub fn sell<P: PriceProvider + ?Sized>(
        &mut self,
        prices: &P,
        symbol: &str,
        quantity: u64,
    ) -> Result<(), CoreError> {
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity(
                "Quantity to sell must be a positive integer".into(),
            ));
        }

        let key = normalize_symbol(symbol);
        let owned = self.get_shares_owned(&key);
        if quantity > owned {
            return Err(CoreError::InsufficientShares {
                symbol: key,
                requested: quantity,
                owned,
            });
        }

        let price = quote(prices, symbol)?;
        let proceeds = price * quantity as f64;
        if !(self.cash_balance + proceeds).is_finite() {
            return Err(CoreError::InvalidAmount(
                "Sale proceeds would overflow the account balance".into(),
            ));
        }

        self.cash_balance += proceeds;
        let remaining = owned - quantity;
        if remaining == 0 {
            self.holdings.remove(&key);
        } else {
            self.holdings.insert(key.clone(), remaining);
        }
        debug!(account = %self.id, symbol = %key, quantity, price, proceeds, "sell");
        let ts = self.next_timestamp();
        self.record(Transaction::trade(TransactionKind::Sell, key, quantity, price, proceeds, ts));
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn get_cash_balance(&self) -> f64 {
        self.cash_balance
    }

    /// Cumulative deposits, including the initial one.
    pub fn get_total_deposited(&self) -> f64 {
        self.total_deposited
    }

    /// Copy of the current holdings (uppercase symbol → quantity).
    pub fn get_holdings(&self) -> HashMap<String, u64> {
        self.holdings.clone()
    }

    /// Number of shares held for `symbol` (case-insensitive), 0 if none.
    pub fn get_shares_owned(&self, symbol: &str) -> u64 {
        self.holdings
            .get(&normalize_symbol(symbol))
            .copied()
            .unwrap_or(0)
    }

    /// Copy of all transactions, oldest first.
    pub fn get_transaction_history(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Transactions of one kind, oldest first.
    pub fn get_transactions_by_kind(&self, kind: TransactionKind) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .cloned()
            .collect()
    }

    /// Trades in `symbol` (case-insensitive), oldest first.
    pub fn get_transactions_for_symbol(&self, symbol: &str) -> Vec<Transaction> {
        let key = normalize_symbol(symbol);
        self.transactions
            .iter()
            .filter(|t| t.symbol.as_deref() == Some(key.as_str()))
            .cloned()
            .collect()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Current reading of the ledger's clock.
    pub fn current_time(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Market value of all holdings.
    ///
    /// A held symbol the provider can't price is valued at 0 and logged;
    /// the rest of the holdings are still counted. Holdings only come from
    /// `buy`, which needed a price, so this fallback shouldn't trigger in
    /// normal use.
    pub fn get_portfolio_value<P: PriceProvider + ?Sized>(&self, prices: &P) -> f64 {
        self.holdings
            .iter()
            .map(|(symbol, quantity)| match quote(prices, symbol) {
                Ok(price) => price * *quantity as f64,
                Err(e) => {
                    warn!(account = %self.id, symbol = %symbol, error = %e, "price for owned symbol not found, valuing at 0");
                    0.0
                }
            })
            .sum()
    }

    /// Cash plus market value of holdings.
    pub fn get_total_value<P: PriceProvider + ?Sized>(&self, prices: &P) -> f64 {
        self.get_cash_balance() + self.get_portfolio_value(prices)
    }

    /// Total value minus cumulative deposits. Withdrawals don't affect it.
    pub fn get_profit_loss<P: PriceProvider + ?Sized>(&self, prices: &P) -> f64 {
        self.get_total_value(prices) - self.total_deposited
    }

    // ── Internals ───────────────────────────────────────────────────

    fn record(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Clock reading, never earlier than the last recorded transaction.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        match self.transactions.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }
}

fn is_positive_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Ask the provider for a price and reject quotes that aren't usable.
pub(crate) fn quote<P: PriceProvider + ?Sized>(prices: &P, symbol: &str) -> Result<f64, CoreError> {
    let price = prices.get_price(symbol)?;
    if !is_positive_amount(price) {
        warn!(provider = prices.name(), symbol, price, "provider returned an unusable price");
        return Err(CoreError::UnknownSymbol(symbol.to_string()));
    }
    Ok(price)
}
