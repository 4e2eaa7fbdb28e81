//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Tools are stateless, so the only shared data is read-only: the currency
//! rate table loaded at startup and the server configuration.

use std::sync::Arc;

use chrono::Utc;

use crate::config::ServerConfig;
use crate::tools::ToolContext;
use crate::tools::convert::currency::CurrencyRates;

/// Clone is required by Axum; every field is `Arc`-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<CurrencyRates>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(rates: CurrencyRates, config: ServerConfig) -> Self {
        Self { rates: Arc::new(rates), config: Arc::new(config) }
    }

    /// Tool context for a request handled now.
    #[must_use]
    pub fn tool_context(&self) -> ToolContext<'_> {
        ToolContext { rates: &self.rates, now: Utc::now() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// `AppState` with the built-in rates and default configuration.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(CurrencyRates::default(), ServerConfig::default())
    }

    /// `AppState` with a custom configuration.
    #[must_use]
    pub fn test_app_state_with_config(config: ServerConfig) -> AppState {
        AppState::new(CurrencyRates::default(), config)
    }
}
