use crate::application::session::BridgeResponse;
use crate::domain::response::ResponsePayload;
use crate::error::{ErrorKind, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ResponseRecord<'a> {
    seq: usize,
    action: &'a str,
    #[serde(flatten)]
    outcome: Outcome<'a>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome<'a> {
    Ok { payload: &'a ResponsePayload },
    Error { kind: ErrorKind, message: String },
    NotHandled,
    Pending,
}

/// Writes one JSON object per line for each command outcome.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_response(
        &mut self,
        seq: usize,
        action: &str,
        response: &BridgeResponse,
    ) -> Result<()> {
        let outcome = match response {
            Ok(payload) => Outcome::Ok { payload },
            Err(e) => Outcome::Error {
                kind: e.kind(),
                message: e.to_string(),
            },
        };
        self.write_record(seq, action, outcome)
    }

    pub fn write_not_handled(&mut self, seq: usize, action: &str) -> Result<()> {
        self.write_record(seq, action, Outcome::NotHandled)
    }

    pub fn write_pending(&mut self, seq: usize, action: &str) -> Result<()> {
        self.write_record(seq, action, Outcome::Pending)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, seq: usize, action: &str, outcome: Outcome<'_>) -> Result<()> {
        let record = ResponseRecord {
            seq,
            action,
            outcome,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
