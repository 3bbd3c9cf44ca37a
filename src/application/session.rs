use crate::domain::command::{ClientToken, CorrelationId};
use crate::domain::response::ResponsePayload;
use crate::error::{BridgeError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// The single terminal outcome of a command.
pub type BridgeResponse = Result<ResponsePayload>;

/// Single-use handle that delivers a command's terminal outcome to its caller.
///
/// `deliver` consumes the sink, so a second delivery cannot be expressed.
#[derive(Debug)]
pub struct ResponseSink {
    action: &'static str,
    tx: oneshot::Sender<BridgeResponse>,
}

impl ResponseSink {
    /// Creates a sink and the caller-side handle that receives its outcome.
    pub fn channel(action: &'static str) -> (Self, PendingResponse) {
        let (tx, rx) = oneshot::channel();
        (
            Self { action, tx },
            PendingResponse {
                action,
                rx,
                finished: false,
            },
        )
    }

    pub fn action(&self) -> &'static str {
        self.action
    }

    pub fn deliver(self, response: BridgeResponse) {
        if self.tx.send(response).is_err() {
            debug!(action = self.action, "caller stopped listening before delivery");
        }
    }
}

/// Caller side of a [`ResponseSink`].
#[derive(Debug)]
pub struct PendingResponse {
    action: &'static str,
    rx: oneshot::Receiver<BridgeResponse>,
    finished: bool,
}

impl PendingResponse {
    pub fn action(&self) -> &'static str {
        self.action
    }

    /// Waits for the outcome. A sink dropped without delivering (for instance
    /// by a re-`initialize`) is reported as an internal error.
    pub async fn wait(self) -> BridgeResponse {
        let action = self.action;
        self.rx.await.unwrap_or_else(|_| Err(discarded(action)))
    }

    /// Returns the outcome if it has arrived. Yields `Some` at most once.
    pub fn try_take(&mut self) -> Option<BridgeResponse> {
        if self.finished {
            return None;
        }
        let response = match self.rx.try_recv() {
            Ok(response) => response,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(discarded(self.action)),
        };
        self.finished = true;
        Some(response)
    }
}

fn discarded(action: &str) -> BridgeError {
    BridgeError::Internal(format!("{action} was discarded before a result arrived"))
}

/// Sequence number distinguishing successive pending commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Round(u64);

/// The one outstanding asynchronous command.
#[derive(Debug)]
pub struct PendingCommand {
    pub correlation_id: CorrelationId,
    pub round: Round,
    pub sink: ResponseSink,
    timer: Option<AbortHandle>,
}

impl PendingCommand {
    /// Stops the expiry timer armed for this round, if any.
    pub fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Returned by [`SessionState::begin_pending`] when the slot is taken, handing
/// the rejected sink back to the caller.
#[derive(Debug)]
pub struct Occupied {
    pub pending: CorrelationId,
    pub sink: ResponseSink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub initialized: bool,
    pub pending: Option<CorrelationId>,
}

#[derive(Debug, Default)]
struct Session {
    token: Option<ClientToken>,
    pending: Option<PendingCommand>,
    next_round: u64,
}

/// Session configuration plus the single pending-command slot.
///
/// Every operation on the slot happens under one lock, so the first resolver
/// to take a pending command wins and later resolvers for the same round find
/// the slot empty.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    inner: Arc<Mutex<Session>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token`, replacing any previous one. A pending command is
    /// dropped without being resolved.
    pub async fn initialize(&self, token: ClientToken) {
        let mut session = self.inner.lock().await;
        if let Some(mut dropped) = session.pending.take() {
            dropped.disarm();
            warn!(
                request = %dropped.correlation_id,
                action = dropped.sink.action(),
                "re-initialize discarded a pending command"
            );
        }
        session.token = Some(token);
    }

    pub async fn token(&self) -> Option<ClientToken> {
        self.inner.lock().await.token.clone()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.inner.lock().await;
        SessionSnapshot {
            initialized: session.token.is_some(),
            pending: session.pending.as_ref().map(|p| p.correlation_id),
        }
    }

    /// Installs a pending command, or hands the sink back if one is in flight.
    pub async fn begin_pending(
        &self,
        correlation_id: CorrelationId,
        sink: ResponseSink,
    ) -> std::result::Result<Round, Occupied> {
        let mut session = self.inner.lock().await;
        if let Some(current) = &session.pending {
            return Err(Occupied {
                pending: current.correlation_id,
                sink,
            });
        }
        let round = Round(session.next_round);
        session.next_round += 1;
        debug!(request = %correlation_id, ?round, "pending command installed");
        session.pending = Some(PendingCommand {
            correlation_id,
            round,
            sink,
            timer: None,
        });
        Ok(round)
    }

    /// Attaches the expiry timer of `round`. If that round has already been
    /// resolved the timer is stopped at once.
    pub async fn attach_timer(&self, round: Round, timer: AbortHandle) {
        let mut session = self.inner.lock().await;
        match session.pending.as_mut() {
            Some(pending) if pending.round == round => pending.timer = Some(timer),
            _ => timer.abort(),
        }
    }

    /// Takes the pending command only if it belongs to `correlation_id`.
    pub async fn take_pending(&self, correlation_id: CorrelationId) -> Option<PendingCommand> {
        self.take_if(|p| p.correlation_id == correlation_id).await
    }

    /// Takes the pending command only if it is still `round`.
    pub async fn take_round(&self, round: Round) -> Option<PendingCommand> {
        self.take_if(|p| p.round == round).await
    }

    /// Takes whatever command is pending.
    pub async fn take_current(&self) -> Option<PendingCommand> {
        self.take_if(|_| true).await
    }

    async fn take_if(&self, matches: impl FnOnce(&PendingCommand) -> bool) -> Option<PendingCommand> {
        let mut session = self.inner.lock().await;
        if session.pending.as_ref().is_some_and(matches) {
            session.pending.take()
        } else {
            None
        }
    }
}
