//! Logging setup for the `rv` binary.
//!
//! - stdout is reserved for command payloads (markup, JSON)
//! - stderr receives all log output, human-readable or JSON lines
//! - every invocation gets a run id, recorded on the root span

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events follow the configured level. Dependencies stay at
/// `warn`.
const OWN_TARGETS: [&str; 4] = ["rv", "rv_session", "rv_render", "rv_common"];

/// Filter directives for `level` when RUST_LOG is not set.
pub fn default_directives(level: LogLevel) -> String {
    if level == LogLevel::Off {
        return "off".to_string();
    }
    let mut directives = String::from("warn");
    for target in OWN_TARGETS {
        directives.push_str(&format!(",{}={}", target, level));
    }
    directives
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs. RUST_LOG, when
/// set, replaces the computed filter entirely.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.level)));

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .init();
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .init();
        }
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // First 12 hex chars are plenty to correlate one run's lines
    format!("run-{}", &uuid.to_string()[..12])
}
