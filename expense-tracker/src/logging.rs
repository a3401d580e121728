use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::log_buffer::{LogBuffer, LogEntry};

const APP_NAME: &str = "expense-tracker";

/// `<config_dir>/expense-tracker/logs`
pub fn logs_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not find config directory")?;
    Ok(config_dir.join(APP_NAME).join("logs"))
}

fn log_file_name(started: DateTime<Local>) -> String {
    format!("{}-{}.log", APP_NAME, started.format("%Y-%m-%d-%H-%M-%S"))
}

/// Initialize tracing with a log file per run and an in-memory buffer for the logs screen.
///
/// The terminal is owned by the UI, so nothing is written to stdout.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging_with_buffer(buffer: LogBuffer) -> Result<PathBuf> {
    let logs_dir = logs_dir()?;
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Could not create {}", logs_dir.display()))?;
    init_logging_in(&logs_dir, buffer)
}

fn init_logging_in(logs_dir: &Path, buffer: LogBuffer) -> Result<PathBuf> {
    let log_filename = log_file_name(Local::now());
    let log_path = logs_dir.join(&log_filename);

    let file_appender = tracing_appender::rolling::never(logs_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(LogBufferLayer::new(buffer))
        .try_init()
        .context("Logging was already initialized")?;

    // The writer thread flushes on drop; it has to live as long as the process
    std::mem::forget(guard);

    Ok(log_path)
}

/// A tracing layer that captures log entries to an in-memory buffer
pub struct LogBufferLayer {
    buffer: LogBuffer,
}

impl LogBufferLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for LogBufferLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.push(LogEntry {
            timestamp: Local::now(),
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
        });
    }
}

/// Pulls the `message` field out of an event
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}
