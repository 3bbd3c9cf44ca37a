#![allow(dead_code)]

use async_trait::async_trait;
use paybridge::application::dispatcher::CommandDispatcher;
use paybridge::application::session::{BridgeResponse, PendingResponse};
use paybridge::config::BridgeConfig;
use paybridge::domain::payment_method::{
    CardDetails, PayPalAccountDetails, PaymentMethodDetails, PaymentMethodResult,
    ThreeDSecureInfo, VenmoAccountDetails,
};
use paybridge::domain::command::ClientToken;
use paybridge::domain::ports::{DeviceDataCollector, DropInRequest, PayPalRequest, PaymentUi};
use paybridge::error::{BridgeError, Result};
use paybridge::infrastructure::recording::{FixedDeviceData, RecordingPaymentUi};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const DEVICE_DATA: &str = "{\"correlation_id\":\"device-1\"}";

pub fn bridge() -> (CommandDispatcher, RecordingPaymentUi) {
    bridge_with(BridgeConfig::default())
}

pub fn bridge_with(config: BridgeConfig) -> (CommandDispatcher, RecordingPaymentUi) {
    let ui = RecordingPaymentUi::new();
    let dispatcher = CommandDispatcher::new(
        Box::new(ui.clone()),
        Arc::new(FixedDeviceData::new(DEVICE_DATA)),
        config,
    );
    (dispatcher, ui)
}

/// Runs a command and returns its handle, panicking if it was not handled.
pub async fn start(dispatcher: &CommandDispatcher, action: &str, args: &[Value]) -> PendingResponse {
    dispatcher
        .execute(action, args)
        .await
        .handled()
        .unwrap_or_else(|| panic!("{action} was not handled"))
}

/// Runs a command that must answer synchronously.
pub async fn run_sync(dispatcher: &CommandDispatcher, action: &str, args: &[Value]) -> BridgeResponse {
    let mut response = start(dispatcher, action, args).await;
    response
        .try_take()
        .unwrap_or_else(|| panic!("{action} did not answer synchronously"))
}

pub async fn initialized_bridge() -> (CommandDispatcher, RecordingPaymentUi) {
    let (dispatcher, ui) = bridge();
    run_sync(&dispatcher, "initialize", &[json!("tok_abc")])
        .await
        .expect("initialize");
    (dispatcher, ui)
}

pub fn card_result(three_d_secure: Option<ThreeDSecureInfo>) -> PaymentMethodResult {
    PaymentMethodResult::new(
        "nonce-card-1",
        "Visa",
        "ending in 42",
        PaymentMethodDetails::Card(CardDetails {
            last_two_digits: "42".into(),
            network: "Visa".into(),
            three_d_secure,
        }),
    )
}

pub fn pay_pal_result() -> PaymentMethodResult {
    PaymentMethodResult::new(
        "nonce-pp-1",
        "PayPal",
        "jane@example.com",
        PaymentMethodDetails::PayPalAccount(PayPalAccountDetails {
            email: Some("jane@example.com".into()),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            phone: None,
            client_metadata_id: Some("cmid-1".into()),
            payer_id: Some("PAYER-1".into()),
        }),
    )
}

pub fn venmo_result() -> PaymentMethodResult {
    PaymentMethodResult::new(
        "nonce-venmo-1",
        "Venmo",
        "@jane",
        PaymentMethodDetails::VenmoAccount(VenmoAccountDetails {
            username: "jane".into(),
        }),
    )
}

/// Device data collector that always fails.
pub struct BrokenDeviceData;

#[async_trait]
impl DeviceDataCollector for BrokenDeviceData {
    async fn collect(&self) -> Result<String> {
        Err(BridgeError::Internal("collector offline".into()))
    }
}

/// Payment UI whose launches panic. `configure` panics only when asked to.
#[derive(Debug, Default, Clone)]
pub struct PanickingPaymentUi {
    panic_on_configure: Arc<AtomicBool>,
}

impl PanickingPaymentUi {
    pub fn set_panic_on_configure(&self, panic: bool) {
        self.panic_on_configure.store(panic, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentUi for PanickingPaymentUi {
    async fn configure(&self, _token: &ClientToken) -> Result<()> {
        if self.panic_on_configure.load(Ordering::SeqCst) {
            panic!("configure crashed");
        }
        Ok(())
    }

    async fn launch_drop_in(&self, _request: DropInRequest) -> Result<()> {
        panic!("drop-in crashed");
    }

    async fn request_one_time_payment(&self, _request: PayPalRequest) -> Result<()> {
        panic!("checkout crashed");
    }

    async fn authorize_account(&self) -> Result<()> {
        panic!("vault crashed");
    }
}
