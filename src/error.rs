use crate::domain::command::CorrelationId;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("The payment client must first be initialized via initialize(token)")]
    NotInitialized,
    #[error("Another asynchronous command ({0}) is still awaiting its result.")]
    AlreadyPending(CorrelationId),
    #[error("Activity result handler for {0} not implemented.")]
    NotImplemented(CorrelationId),
    #[error(
        "Result was not RESULT_CANCELED, but no PaymentMethodNonce was returned from the payment UI."
    )]
    ContractViolation,
    #[error("No result arrived for {0} within the configured timeout.")]
    Timeout(CorrelationId),
    #[error("Uncaught exception: {0}")]
    Internal(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stable, machine-readable classification of a [`BridgeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotInitialized,
    AlreadyPending,
    NotImplemented,
    ContractViolation,
    Timeout,
    Internal,
}

impl BridgeError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotInitialized => ErrorKind::NotInitialized,
            Self::AlreadyPending(_) => ErrorKind::AlreadyPending,
            Self::NotImplemented(_) => ErrorKind::NotImplemented,
            Self::ContractViolation => ErrorKind::ContractViolation,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Internal(_) | Self::Io(_) | Self::Json(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
