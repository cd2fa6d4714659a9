/*!
 * Diagnostic Tracing
 * Structured tracing for demonstrations and child processes using the tracing crate
 *
 * Diagnostics always go to stderr: child processes use stdout as a data channel.
 */

use crate::core::limits::SLOW_DEMO_THRESHOLD;
use crate::core::types::Mechanism;
use std::time::Instant;
use tracing::{debug, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Environment switch for JSON diagnostics
pub const TRACE_JSON_ENV: &str = "IPC_DEBUGGER_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - IPC_DEBUGGER_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!(json = use_json, pid = std::process::id(), "tracing initialized");
    }
}

/// Generate a unique trace ID for correlating a demo with its children
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one demonstration
pub struct DemoSpan {
    span: tracing::Span,
    start: Instant,
    mechanism: Mechanism,
    trace_id: String,
}

impl DemoSpan {
    pub fn new(mechanism: Mechanism) -> Self {
        let trace_id = generate_trace_id();
        let span = span!(
            Level::INFO,
            "demo",
            trace_id = %trace_id,
            mechanism = mechanism.as_str(),
            result = tracing::field::Empty,
            error = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        span.in_scope(|| debug!(mechanism = mechanism.as_str(), "demo started"));

        Self {
            span,
            start: Instant::now(),
            mechanism,
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// The underlying span, for instrumenting futures
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }

    pub fn record_error(&self, error: &dyn std::error::Error) {
        self.span.record("error", tracing::field::display(error));
        self.span.record("result", "error");
    }
}

impl Drop for DemoSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_ms", duration.as_millis() as u64);

        let _entered = self.span.enter();
        if duration > SLOW_DEMO_THRESHOLD {
            warn!(
                trace_id = %self.trace_id,
                mechanism = self.mechanism.as_str(),
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow demo detected"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                mechanism = self.mechanism.as_str(),
                duration_ms = duration.as_millis() as u64,
                "demo finished"
            );
        }
    }
}
