use super::guard::guarded;
use super::session::{
    BridgeResponse, Occupied, PendingCommand, ResponseSink, Round, SessionState,
};
use crate::domain::command::CorrelationId;
use crate::domain::normalizer::{normalize, normalize_nonce_created};
use crate::domain::payment_method::PaymentMethodResult;
use crate::domain::ports::SharedDeviceDataCollector;
use crate::domain::response::ResponsePayload;
use crate::error::BridgeError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// What the payment UI reported when it finished.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UiResult {
    Canceled,
    Ok {
        #[serde(default)]
        nonce: Option<PaymentMethodResult>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Awaiting(CorrelationId),
}

/// Whether a completion event resolved a pending command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Discarded,
}

/// Pairs completion events from the UI-result channel and the out-of-band
/// nonce channel with the pending command in [`SessionState`].
///
/// Both channels race for the same slot. Whichever takes it first delivers;
/// every later event for that round is discarded without reaching the caller.
#[derive(Clone)]
pub struct ResultRouter {
    session: SessionState,
    device_data: SharedDeviceDataCollector,
    pending_timeout: Option<Duration>,
}

impl ResultRouter {
    /// Creates a new `ResultRouter` over a shared session.
    ///
    /// # Arguments
    ///
    /// * `session` - The session whose pending slot this router resolves.
    /// * `device_data` - Collector whose output is attached to out-of-band nonces.
    /// * `pending_timeout` - When set, a pending command unresolved for this
    ///   long is answered with a timeout error.
    pub fn new(
        session: SessionState,
        device_data: SharedDeviceDataCollector,
        pending_timeout: Option<Duration>,
    ) -> Self {
        Self {
            session,
            device_data,
            pending_timeout,
        }
    }

    pub async fn state(&self) -> RouterState {
        match self.session.snapshot().await.pending {
            Some(id) => RouterState::Awaiting(id),
            None => RouterState::Idle,
        }
    }

    /// `Idle -> Awaiting(id)`. Arms the expiry timer when one is configured.
    pub async fn begin(
        &self,
        correlation_id: CorrelationId,
        sink: ResponseSink,
    ) -> Result<Round, Occupied> {
        let round = self.session.begin_pending(correlation_id, sink).await?;
        if let Some(timeout) = self.pending_timeout {
            self.arm_timeout(correlation_id, round, timeout).await;
        }
        Ok(round)
    }

    /// Handles a result from the UI-result channel.
    pub async fn on_ui_result(&self, request: CorrelationId, result: UiResult) -> Delivery {
        let Some(pending) = self.session.take_pending(request).await else {
            debug!(%request, "discarding UI result with no matching pending command");
            return Delivery::Discarded;
        };

        let response = match request {
            CorrelationId::DropIn => drop_in_response(result),
            unhandled => {
                warn!(
                    request = %unhandled,
                    request_code = unhandled.request_code(),
                    "no result handler for request"
                );
                Err(BridgeError::NotImplemented(unhandled))
            }
        };
        resolve(pending, response)
    }

    /// Handles a nonce from the out-of-band listener channel. Resolves whatever
    /// command is pending.
    pub async fn on_nonce_created(&self, nonce: PaymentMethodResult) -> Delivery {
        let Some(pending) = self.session.take_current().await else {
            debug!("discarding created nonce with no pending command");
            return Delivery::Discarded;
        };

        let response = match guarded(self.device_data.collect()).await {
            Ok(device_data) => Ok(ResponsePayload::NonceCreated(normalize_nonce_created(
                &nonce,
                device_data,
            ))),
            Err(e) => Err(BridgeError::Internal(format!(
                "device data collection failed: {e}"
            ))),
        };
        resolve(pending, response)
    }

    /// Resolves `round` with `error` if it is still pending.
    pub async fn fail_round(&self, round: Round, error: BridgeError) -> Delivery {
        match self.session.take_round(round).await {
            Some(pending) => resolve(pending, Err(error)),
            None => Delivery::Discarded,
        }
    }

    async fn arm_timeout(&self, correlation_id: CorrelationId, round: Round, timeout: Duration) {
        let router = self.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if router
                .fail_round(round, BridgeError::Timeout(correlation_id))
                .await
                == Delivery::Delivered
            {
                warn!(request = %correlation_id, ?timeout, "pending command expired");
            }
        });
        self.session.attach_timer(round, timer.abort_handle()).await;
    }
}

fn drop_in_response(result: UiResult) -> BridgeResponse {
    match result {
        UiResult::Canceled => Ok(ResponsePayload::user_cancelled()),
        UiResult::Ok { nonce: Some(nonce) } => Ok(ResponsePayload::Nonce(normalize(&nonce))),
        UiResult::Ok { nonce: None } => Err(BridgeError::ContractViolation),
    }
}

fn resolve(mut pending: PendingCommand, response: BridgeResponse) -> Delivery {
    pending.disarm();
    debug!(
        request = %pending.correlation_id,
        action = pending.sink.action(),
        ok = response.is_ok(),
        "resolving pending command"
    );
    pending.sink.deliver(response);
    Delivery::Delivered
}
