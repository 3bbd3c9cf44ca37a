use crate::domain::command::ClientToken;
use crate::domain::ports::{DeviceDataCollector, DropInRequest, PayPalRequest, PaymentUi};
use crate::error::{BridgeError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// A call made against the payment UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiLaunch {
    Configure(ClientToken),
    DropIn(DropInRequest),
    OneTimePayment(PayPalRequest),
    AuthorizeAccount,
}

/// A payment UI that only records what it was asked to do.
///
/// Results are fed back separately through the router, which makes this the
/// adapter for scripted sessions and tests. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct RecordingPaymentUi {
    launches: Arc<RwLock<Vec<UiLaunch>>>,
    unavailable: Arc<AtomicBool>,
}

impl RecordingPaymentUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent launch fail, as a UI that cannot start would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn launches(&self) -> Vec<UiLaunch> {
        self.launches.read().await.clone()
    }

    async fn record(&self, launch: UiLaunch) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BridgeError::Internal("payment UI is unavailable".to_string()));
        }
        self.launches.write().await.push(launch);
        Ok(())
    }
}

#[async_trait]
impl PaymentUi for RecordingPaymentUi {
    async fn configure(&self, token: &ClientToken) -> Result<()> {
        self.record(UiLaunch::Configure(token.clone())).await
    }

    async fn launch_drop_in(&self, request: DropInRequest) -> Result<()> {
        self.record(UiLaunch::DropIn(request)).await
    }

    async fn request_one_time_payment(&self, request: PayPalRequest) -> Result<()> {
        self.record(UiLaunch::OneTimePayment(request)).await
    }

    async fn authorize_account(&self) -> Result<()> {
        self.record(UiLaunch::AuthorizeAccount).await
    }
}

/// Device data collector returning a fixed value.
#[derive(Debug, Clone)]
pub struct FixedDeviceData {
    value: String,
}

impl FixedDeviceData {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[async_trait]
impl DeviceDataCollector for FixedDeviceData {
    async fn collect(&self) -> Result<String> {
        Ok(self.value.clone())
    }
}
