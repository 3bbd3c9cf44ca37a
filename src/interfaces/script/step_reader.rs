use crate::application::router::UiResult;
use crate::domain::command::CorrelationId;
use crate::domain::payment_method::PaymentMethodResult;
use crate::error::{BridgeError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::io::BufRead;

/// One line of a session script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    /// A command issued by the host application.
    Command {
        action: String,
        #[serde(default)]
        args: Vec<Value>,
    },
    /// A result delivered on the UI-result channel.
    UiResult {
        request: CorrelationId,
        result: UiResult,
    },
    /// A nonce delivered on the out-of-band listener channel.
    NonceCreated { nonce: PaymentMethodResult },
}

/// Reads script steps from a JSON-lines source.
///
/// Blank lines are skipped. A malformed line yields an error for that line
/// only; reading continues with the next one.
pub struct StepReader<R: BufRead> {
    source: R,
}

impl<R: BufRead> StepReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Lazily yields `(line number, step)` pairs.
    pub fn steps(self) -> impl Iterator<Item = (usize, Result<ScriptStep>)> {
        self.source
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.map_err(BridgeError::from)))
            .filter(|(_, line)| !matches!(line, Ok(text) if text.trim().is_empty()))
            .map(|(line_no, line)| {
                let step = line.and_then(|text| {
                    serde_json::from_str::<ScriptStep>(&text).map_err(BridgeError::from)
                });
                (line_no, step)
            })
    }
}
