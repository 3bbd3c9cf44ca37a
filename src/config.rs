use std::time::Duration;

pub const DEFAULT_CART_CURRENCY: &str = "GBP";

/// Runtime settings for a bridge instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// How long a pending command may wait for a result before it resolves
    /// with a timeout. `None` waits indefinitely.
    pub pending_timeout: Option<Duration>,
    /// Currency for the wallet cart attached to drop-in requests.
    pub cart_currency: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            pending_timeout: None,
            cart_currency: DEFAULT_CART_CURRENCY.to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn with_pending_timeout(mut self, timeout: Duration) -> Self {
        self.pending_timeout = Some(timeout);
        self
    }

    pub fn with_cart_currency(mut self, currency: impl Into<String>) -> Self {
        self.cart_currency = currency.into();
        self
    }
}
