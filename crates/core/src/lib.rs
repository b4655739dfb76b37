pub mod errors;
pub mod ledger;
pub mod models;
pub mod providers;
pub mod services;

use std::collections::HashMap;
use std::sync::Arc;

use ledger::Ledger;
use models::{
    analytics::AccountSummary,
    settings::{validate_currency, Settings},
    transaction::{Transaction, TransactionKind},
};
use providers::{
    clock::{Clock, SystemClock},
    fixed::FixedPriceTable,
    registry::PriceProviderRegistry,
    traits::PriceProvider,
};
use services::analytics_service::AnalyticsService;

use errors::CoreError;

/// Main entry point for the Paper Ledger core library.
/// Holds one account together with the market it trades against.
///
/// Prices come from a simulated market (`FixedPriceTable`) seeded with the
/// default quotes plus any `Settings::price_overrides`. Extra providers
/// registered later are consulted only for symbols the market doesn't quote.
#[must_use]
pub struct TradingDesk {
    ledger: Ledger,
    market: Arc<FixedPriceTable>,
    prices: PriceProviderRegistry,
    settings: Settings,
    analytics_service: AnalyticsService,
}

impl std::fmt::Debug for TradingDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingDesk")
            .field("account", &self.ledger.id())
            .field("transactions", &self.ledger.transaction_count())
            .field("providers", &self.prices.provider_names())
            .field("settings", &self.settings)
            .finish()
    }
}

impl TradingDesk {
    /// Open a brand new account with a random id and default settings.
    pub fn create_new(owner_name: impl Into<String>, initial_deposit: f64) -> Result<Self, CoreError> {
        Self::open(
            uuid::Uuid::new_v4().to_string(),
            owner_name,
            initial_deposit,
            Settings::default(),
        )
    }

    /// Open an account with an explicit id and settings.
    pub fn open(
        id: impl Into<String>,
        owner_name: impl Into<String>,
        initial_deposit: f64,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        Self::open_with_clock(id, owner_name, initial_deposit, settings, Box::new(SystemClock))
    }

    /// Open an account whose transactions are timestamped by `clock`.
    pub fn open_with_clock(
        id: impl Into<String>,
        owner_name: impl Into<String>,
        initial_deposit: f64,
        settings: Settings,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CoreError> {
        let mut settings = settings;
        settings.default_currency = settings.default_currency.trim().to_uppercase();
        settings.validate()?;

        let market = Arc::new(FixedPriceTable::with_defaults());
        for (symbol, price) in &settings.price_overrides {
            market.set_price(symbol, *price)?;
        }

        let mut prices = PriceProviderRegistry::new();
        prices.register(Box::new(Arc::clone(&market)));

        let ledger = Ledger::with_clock(id, owner_name, initial_deposit, clock)?;

        Ok(Self {
            ledger,
            market,
            prices,
            settings,
            analytics_service: AnalyticsService::new(),
        })
    }

    // ── Cash & Trading ──────────────────────────────────────────────

    pub fn deposit(&mut self, amount: f64) -> Result<(), CoreError> {
        self.ledger.deposit(amount)
    }

    pub fn withdraw(&mut self, amount: f64) -> Result<(), CoreError> {
        self.ledger.withdraw(amount)
    }

    /// Buy shares at the current market price.
    pub fn buy(&mut self, symbol: &str, quantity: u64) -> Result<(), CoreError> {
        self.ledger.buy(&self.prices, symbol, quantity)
    }

    /// Sell owned shares at the current market price.
    pub fn sell(&mut self, symbol: &str, quantity: u64) -> Result<(), CoreError> {
        self.ledger.sell(&self.prices, symbol, quantity)
    }

    // ── Account State ───────────────────────────────────────────────

    /// Read-only access to the underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn get_cash_balance(&self) -> f64 {
        self.ledger.get_cash_balance()
    }

    #[must_use]
    pub fn get_holdings(&self) -> HashMap<String, u64> {
        self.ledger.get_holdings()
    }

    #[must_use]
    pub fn get_transaction_history(&self) -> Vec<Transaction> {
        self.ledger.get_transaction_history()
    }

    #[must_use]
    pub fn get_transactions_by_kind(&self, kind: TransactionKind) -> Vec<Transaction> {
        self.ledger.get_transactions_by_kind(kind)
    }

    // ── Value ───────────────────────────────────────────────────────

    #[must_use]
    pub fn get_portfolio_value(&self) -> f64 {
        self.ledger.get_portfolio_value(&self.prices)
    }

    #[must_use]
    pub fn get_total_value(&self) -> f64 {
        self.ledger.get_total_value(&self.prices)
    }

    #[must_use]
    pub fn get_profit_loss(&self) -> f64 {
        self.ledger.get_profit_loss(&self.prices)
    }

    /// Full summary with per-holding prices and allocation.
    #[must_use]
    pub fn get_account_summary(&self) -> AccountSummary {
        self.analytics_service.get_account_summary(
            &self.ledger,
            &self.prices,
            &self.settings.default_currency,
            self.ledger.current_time(),
        )
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Current price of `symbol` from the first provider that quotes it.
    pub fn get_share_price(&self, symbol: &str) -> Result<f64, CoreError> {
        self.prices.get_price(symbol)
    }

    /// Move the simulated market price of `symbol`.
    pub fn set_share_price(&mut self, symbol: &str, price: f64) -> Result<(), CoreError> {
        self.market.set_price(symbol, price)?;
        self.settings
            .price_overrides
            .insert(providers::traits::normalize_symbol(symbol), price);
        Ok(())
    }

    /// Add a fallback price source for symbols the simulated market doesn't quote.
    pub fn register_price_provider(&mut self, provider: Box<dyn PriceProvider>) {
        self.prices.register(provider);
    }

    /// Names of the price sources, in lookup order.
    #[must_use]
    pub fn get_provider_names(&self) -> Vec<String> {
        self.prices.provider_names()
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the display currency (e.g., "PLN", "USD", "EUR").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_default_currency(&mut self, currency: String) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        validate_currency(&trimmed)?;
        self.settings.default_currency = trimmed;
        Ok(())
    }

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }
}
