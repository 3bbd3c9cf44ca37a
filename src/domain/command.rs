use crate::error::{BridgeError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Identifies which asynchronous flow a completion event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationId {
    DropIn,
    PaymentButton,
    Custom,
    PayPal,
}

impl CorrelationId {
    /// Request code used when launching the UI activity for this flow.
    pub fn request_code(self) -> u16 {
        match self {
            Self::DropIn => 100,
            Self::PaymentButton => 200,
            Self::Custom => 300,
            Self::PayPal => 400,
        }
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DropIn => "DROP_IN_REQUEST",
            Self::PaymentButton => "PAYMENT_BUTTON_REQUEST",
            Self::Custom => "CUSTOM_REQUEST",
            Self::PayPal => "PAYPAL_REQUEST",
        };
        f.write_str(name)
    }
}

/// Opaque authorization credential handed to `initialize`.
///
/// Never empty. `Debug` output is redacted so tokens do not leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientToken(String);

impl ClientToken {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(BridgeError::invalid_argument("A token is required."));
        }
        Ok(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientToken(***)")
    }
}

/// A payment amount exactly as the caller supplied it.
///
/// Only emptiness is checked. The text is passed downstream verbatim, so
/// locale-formatted amounts such as `10,00` reach the payment UI untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount(String);

impl Amount {
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(BridgeError::invalid_argument("amount is required."));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The amount as a decimal, when the text is a plain decimal number.
    pub fn value(&self) -> Option<Decimal> {
        Decimal::from_str(self.0.trim()).ok()
    }
}

/// The command names this bridge answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Initialize,
    PresentDropInPaymentUi,
    PayPalProcess,
    PayPalProcessVaulted,
}

impl CommandName {
    /// Returns `None` for actions this bridge does not handle.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "initialize" => Some(Self::Initialize),
            "presentDropInPaymentUI" => Some(Self::PresentDropInPaymentUi),
            "payPalProcess" => Some(Self::PayPalProcess),
            "payPalProcessVaulted" => Some(Self::PayPalProcessVaulted),
            _ => None,
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::PresentDropInPaymentUi => "presentDropInPaymentUI",
            Self::PayPalProcess => "payPalProcess",
            Self::PayPalProcessVaulted => "payPalProcessVaulted",
        }
    }

    pub fn requires_session(self) -> bool {
        !matches!(self, Self::Initialize)
    }
}

/// A fully validated command, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Initialize {
        token: ClientToken,
    },
    PresentDropInPaymentUi {
        amount: Amount,
        description: String,
    },
    PayPalProcess {
        amount: Amount,
        currency_code: String,
    },
    PayPalProcessVaulted,
}

impl Command {
    /// Validates argument count and types for `name`. No side effects.
    pub fn from_args(name: CommandName, args: &[Value]) -> Result<Self> {
        match name {
            CommandName::Initialize => {
                if args.len() != 1 {
                    return Err(BridgeError::invalid_argument("A token is required."));
                }
                let token = string_arg(args, 0)
                    .ok_or_else(|| BridgeError::invalid_argument("A token is required."))?;
                Ok(Self::Initialize {
                    token: ClientToken::new(token)?,
                })
            }
            CommandName::PresentDropInPaymentUi => {
                let amount = required(args, 0, "amount")?;
                let description = required(args, 1, "description")?;
                Ok(Self::PresentDropInPaymentUi {
                    amount: Amount::parse(amount)?,
                    description,
                })
            }
            CommandName::PayPalProcess => {
                let amount = required(args, 0, "amount")?;
                let currency_code = required(args, 1, "currencyCode")?;
                Ok(Self::PayPalProcess {
                    amount: Amount::parse(amount)?,
                    currency_code,
                })
            }
            CommandName::PayPalProcessVaulted => Ok(Self::PayPalProcessVaulted),
        }
    }

    pub fn correlation_id(&self) -> Option<CorrelationId> {
        match self {
            Self::Initialize { .. } => None,
            Self::PresentDropInPaymentUi { .. } => Some(CorrelationId::DropIn),
            Self::PayPalProcess { .. } | Self::PayPalProcessVaulted => Some(CorrelationId::PayPal),
        }
    }
}

// Strings pass through; numbers and booleans are stringified. Null and
// containers count as absent.
fn string_arg(args: &[Value], index: usize) -> Option<String> {
    match args.get(index)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required(args: &[Value], index: usize, name: &str) -> Result<String> {
    string_arg(args, index)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| BridgeError::invalid_argument(format!("{name} is required.")))
}
