use chrono::{DateTime, Utc};
use tracing::warn;

use crate::ledger::{quote, Ledger};
use crate::models::analytics::{AccountSummary, HoldingSummary};
use crate::providers::traits::PriceProvider;

/// Computes account analytics: per-holding value, allocation, gain/loss.
///
/// Valuation follows the ledger's rules: a holding with no price counts as
/// zero and is reported with `current_price: None`.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Build a full summary of `ledger` priced by `prices`.
    pub fn get_account_summary<P: PriceProvider + ?Sized>(
        &self,
        ledger: &Ledger,
        prices: &P,
        currency: &str,
        as_of: DateTime<Utc>,
    ) -> AccountSummary {
        let mut symbols: Vec<(String, u64)> = ledger.get_holdings().into_iter().collect();
        symbols.sort_by(|a, b| a.0.cmp(&b.0));

        // 1. Price every holding
        let mut holdings = Vec::with_capacity(symbols.len());
        let mut portfolio_value = 0.0;
        for (symbol, quantity) in symbols {
            let current_price = match quote(prices, &symbol) {
                Ok(price) => Some(price),
                Err(e) => {
                    warn!(account = ledger.id(), symbol = %symbol, error = %e, "holding has no price, reported as unavailable");
                    None
                }
            };
            let current_value = current_price.map(|p| p * quantity as f64);
            portfolio_value += current_value.unwrap_or(0.0);
            holdings.push(HoldingSummary {
                symbol,
                quantity,
                current_price,
                current_value,
                allocation_pct: 0.0,
            });
        }

        // 2. Allocation needs the total first
        if portfolio_value > 0.0 {
            for h in &mut holdings {
                h.allocation_pct = h.current_value.unwrap_or(0.0) / portfolio_value * 100.0;
            }
        }

        let cash_balance = ledger.get_cash_balance();
        let total_deposited = ledger.get_total_deposited();
        let total_value = cash_balance + portfolio_value;
        let profit_loss = total_value - total_deposited;
        let return_pct = if total_deposited > 0.0 {
            profit_loss / total_deposited * 100.0
        } else {
            0.0
        };

        AccountSummary {
            account_id: ledger.id().to_string(),
            owner_name: ledger.owner_name().to_string(),
            currency: currency.to_string(),
            as_of,
            cash_balance,
            portfolio_value,
            total_value,
            total_deposited,
            profit_loss,
            return_pct,
            transaction_count: ledger.transaction_count(),
            holdings,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
