use super::guard::guarded;
use super::router::ResultRouter;
use super::session::{BridgeResponse, Occupied, PendingResponse, ResponseSink, SessionState};
use crate::config::BridgeConfig;
use crate::domain::command::{Amount, ClientToken, Command, CommandName, CorrelationId};
use crate::domain::ports::{
    DropInRequest, PayPalRequest, PaymentUiBox, SharedDeviceDataCollector, WalletCart,
};
use crate::domain::response::ResponsePayload;
use crate::error::{BridgeError, Result};
use serde_json::Value;
use std::future::Future;
use tracing::{debug, info, warn};

/// Outcome of offering a command to the dispatcher.
#[derive(Debug)]
pub enum Dispatch {
    /// The action is not one of ours; the caller may try another dispatcher.
    NotHandled,
    /// The action was accepted. Exactly one response will arrive on the handle.
    Handled(PendingResponse),
}

impl Dispatch {
    pub fn handled(self) -> Option<PendingResponse> {
        match self {
            Self::Handled(response) => Some(response),
            Self::NotHandled => None,
        }
    }
}

/// Entry point for commands issued by the host application.
///
/// Synchronous commands and validation failures are answered before
/// `execute` returns. Asynchronous commands install a pending slot, launch the
/// payment UI and are answered later through [`ResultRouter`].
pub struct CommandDispatcher {
    session: SessionState,
    router: ResultRouter,
    ui: PaymentUiBox,
    config: BridgeConfig,
}

impl CommandDispatcher {
    /// Creates a new `CommandDispatcher` with an uninitialized session.
    ///
    /// # Arguments
    ///
    /// * `ui` - The payment UI that launch commands drive.
    /// * `device_data` - Collector attached to out-of-band nonce responses.
    /// * `config` - Cart currency and the optional pending-command timeout.
    pub fn new(
        ui: PaymentUiBox,
        device_data: SharedDeviceDataCollector,
        config: BridgeConfig,
    ) -> Self {
        let session = SessionState::new();
        let router = ResultRouter::new(session.clone(), device_data, config.pending_timeout);
        Self {
            session,
            router,
            ui,
            config,
        }
    }

    /// The router completion channels report into.
    pub fn router(&self) -> &ResultRouter {
        &self.router
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Offers a host command to the bridge.
    ///
    /// Returns [`Dispatch::NotHandled`] for actions this bridge does not know.
    /// Otherwise the returned handle receives exactly one response, even when
    /// a payment UI call fails or panics.
    pub async fn execute(&self, action: &str, args: &[Value]) -> Dispatch {
        let Some(name) = CommandName::from_action(action) else {
            debug!(action, "action not handled");
            return Dispatch::NotHandled;
        };

        info!(action, args = args.len(), "command accepted");
        let (sink, response) = ResponseSink::channel(name.action());
        self.run(name, args, sink).await;
        Dispatch::Handled(response)
    }

    async fn run(&self, name: CommandName, args: &[Value], sink: ResponseSink) {
        let token = self.session.token().await;
        if name.requires_session() && token.is_none() {
            return sink.deliver(Err(BridgeError::NotInitialized));
        }

        let command = match Command::from_args(name, args) {
            Ok(command) => command,
            Err(e) => return sink.deliver(Err(e)),
        };

        match (command, token) {
            (Command::Initialize { token }, _) => sink.deliver(self.initialize(token).await),
            (Command::PresentDropInPaymentUi { amount, description }, Some(token)) => {
                log_amount(&amount);
                let cart =
                    WalletCart::single_item(&self.config.cart_currency, &amount, &description);
                let request = DropInRequest {
                    token,
                    amount,
                    cart,
                };
                self.start(CorrelationId::DropIn, sink, self.ui.launch_drop_in(request))
                    .await;
            }
            (
                Command::PayPalProcess {
                    amount,
                    currency_code,
                },
                Some(_),
            ) => {
                log_amount(&amount);
                let request = PayPalRequest {
                    amount,
                    currency_code,
                };
                self.start(
                    CorrelationId::PayPal,
                    sink,
                    self.ui.request_one_time_payment(request),
                )
                .await;
            }
            (Command::PayPalProcessVaulted, Some(_)) => {
                self.start(CorrelationId::PayPal, sink, self.ui.authorize_account())
                    .await;
            }
            (_, None) => sink.deliver(Err(BridgeError::NotInitialized)),
        }
    }

    async fn initialize(&self, token: ClientToken) -> BridgeResponse {
        guarded(self.ui.configure(&token)).await?;
        self.session.initialize(token).await;
        Ok(ResponsePayload::Ack)
    }

    /// Installs the pending slot before launching so that a fast completion
    /// always finds it. A failed or panicking launch resolves the slot it
    /// installed.
    async fn start<F>(&self, correlation_id: CorrelationId, sink: ResponseSink, launch: F)
    where
        F: Future<Output = Result<()>>,
    {
        let round = match self.router.begin(correlation_id, sink).await {
            Ok(round) => round,
            Err(Occupied { pending, sink }) => {
                warn!(request = %correlation_id, %pending, "rejecting command while another is pending");
                return sink.deliver(Err(BridgeError::AlreadyPending(pending)));
            }
        };

        if let Err(e) = guarded(launch).await {
            warn!(request = %correlation_id, error = %e, "payment UI failed to launch");
            self.router.fail_round(round, e).await;
        }
    }
}

// Amounts are handed to the UI verbatim whatever their format.
fn log_amount(amount: &Amount) {
    if amount.value().is_none() {
        debug!(amount = amount.as_str(), "amount is not a plain decimal");
    }
}
