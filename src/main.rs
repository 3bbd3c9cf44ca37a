use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paybridge::application::dispatcher::{CommandDispatcher, Dispatch};
use paybridge::application::session::PendingResponse;
use paybridge::config::{BridgeConfig, DEFAULT_CART_CURRENCY};
use paybridge::infrastructure::recording::{FixedDeviceData, RecordingPaymentUi};
use paybridge::interfaces::script::response_writer::ResponseWriter;
use paybridge::interfaces::script::step_reader::{ScriptStep, StepReader};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session script: one JSON command or completion event per line
    script: PathBuf,

    /// Resolve commands still pending after this many milliseconds with a timeout
    #[arg(long, env = "PAYBRIDGE_PENDING_TIMEOUT_MS")]
    pending_timeout_ms: Option<u64>,

    /// Currency for the wallet cart attached to drop-in requests
    #[arg(long, env = "PAYBRIDGE_CART_CURRENCY", default_value = DEFAULT_CART_CURRENCY)]
    cart_currency: String,

    /// Device data reported alongside nonces from the listener channel
    #[arg(long, default_value = "{}")]
    device_data: String,
}

impl Cli {
    fn config(&self) -> BridgeConfig {
        let config = BridgeConfig::default().with_cart_currency(&self.cart_currency);
        match self.pending_timeout_ms {
            Some(ms) => config.with_pending_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    let dispatcher = CommandDispatcher::new(
        Box::new(RecordingPaymentUi::new()),
        Arc::new(FixedDeviceData::new(cli.device_data.clone())),
        config.clone(),
    );

    let file = File::open(&cli.script).into_diagnostic()?;
    let reader = StepReader::new(BufReader::new(file));
    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    let mut outstanding: Vec<(usize, PendingResponse)> = Vec::new();
    let mut seq = 0;
    for (line_no, step) in reader.steps() {
        match step {
            Ok(ScriptStep::Command { action, args }) => {
                seq += 1;
                match dispatcher.execute(&action, &args).await {
                    Dispatch::NotHandled => writer.write_not_handled(seq, &action).into_diagnostic()?,
                    Dispatch::Handled(response) => outstanding.push((seq, response)),
                }
            }
            Ok(ScriptStep::UiResult { request, result }) => {
                dispatcher.router().on_ui_result(request, result).await;
            }
            Ok(ScriptStep::NonceCreated { nonce }) => {
                dispatcher.router().on_nonce_created(nonce).await;
            }
            Err(e) => {
                error!(line = line_no, "Error reading step: {e}");
            }
        }
        flush_ready(&mut outstanding, &mut writer).into_diagnostic()?;
    }

    // Commands still waiting at end of script.
    for (seq, response) in outstanding {
        let action = response.action();
        if config.pending_timeout.is_some() {
            let result = response.wait().await;
            writer.write_response(seq, action, &result).into_diagnostic()?;
        } else {
            warn!(seq, action, "command still pending at end of script");
            writer.write_pending(seq, action).into_diagnostic()?;
        }
    }

    Ok(())
}

fn flush_ready<W: Write>(
    outstanding: &mut Vec<(usize, PendingResponse)>,
    writer: &mut ResponseWriter<W>,
) -> paybridge::error::Result<()> {
    let mut ready = Vec::new();
    outstanding.retain_mut(|(seq, response)| match response.try_take() {
        Some(result) => {
            ready.push((*seq, response.action(), result));
            false
        }
        None => true,
    });
    for (seq, action, result) in ready {
        writer.write_response(seq, action, &result)?;
    }
    Ok(())
}
