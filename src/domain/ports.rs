use super::command::{Amount, ClientToken};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Cart attached to a drop-in request for wallet-based payment.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletCart {
    pub currency_code: String,
    pub total_price: String,
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub currency_code: String,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub total_price: String,
}

impl WalletCart {
    /// A cart holding a single line item priced at `amount`.
    pub fn single_item(currency_code: &str, amount: &Amount, description: &str) -> Self {
        Self {
            currency_code: currency_code.to_string(),
            total_price: amount.as_str().to_string(),
            line_items: vec![LineItem {
                currency_code: currency_code.to_string(),
                description: description.to_string(),
                quantity: "1".to_string(),
                unit_price: amount.as_str().to_string(),
                total_price: amount.as_str().to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropInRequest {
    pub token: ClientToken,
    pub amount: Amount,
    pub cart: WalletCart,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayPalRequest {
    pub amount: Amount,
    pub currency_code: String,
}

/// The external payment UI. Launch calls return once the UI has been started;
/// results arrive later through the [`ResultRouter`](crate::application::router::ResultRouter).
#[async_trait]
pub trait PaymentUi: Send + Sync {
    async fn configure(&self, token: &ClientToken) -> Result<()>;
    async fn launch_drop_in(&self, request: DropInRequest) -> Result<()>;
    async fn request_one_time_payment(&self, request: PayPalRequest) -> Result<()>;
    async fn authorize_account(&self) -> Result<()>;
}

#[async_trait]
pub trait DeviceDataCollector: Send + Sync {
    async fn collect(&self) -> Result<String>;
}

pub type PaymentUiBox = Box<dyn PaymentUi>;
pub type SharedDeviceDataCollector = Arc<dyn DeviceDataCollector>;
