/*!
 * Event Sink
 * The single funnel for every user-visible status line
 *
 * Each report is stamped with wall-clock time, appended to an ordered log and
 * broadcast to live subscribers. The presentation layer subscribes and picks
 * its own refresh cadence; reporting never waits on it.
 */

use crate::core::limits::{LOG_CLOCK_FORMAT, SINK_BROADCAST_CAPACITY};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::broadcast;

/// One timestamped log line, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    /// Position in report order (from the sink's counter)
    pub seq: u64,
    pub timestamp: OffsetDateTime,
    pub text: String,
}

impl LogEvent {
    fn now(seq: u64, text: String) -> Self {
        let timestamp =
            OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self {
            seq,
            timestamp,
            text,
        }
    }

    /// Wall-clock time as `HH:MM:SS`
    pub fn clock(&self) -> String {
        self.timestamp
            .format(LOG_CLOCK_FORMAT)
            .unwrap_or_else(|_| "--:--:--".to_string())
    }

    /// `[HH:MM:SS] text`
    pub fn render(&self) -> String {
        format!("[{}] {}", self.clock(), self.text)
    }
}

/// Change notification for subscribers
#[derive(Debug, Clone)]
pub enum SinkUpdate {
    Appended(LogEvent),
    Cleared,
}

struct SinkInner {
    log: RwLock<Vec<LogEvent>>,
    /// Total reports since creation; survives `clear()`
    reported: AtomicU64,
    updates: broadcast::Sender<SinkUpdate>,
}

/// Cloneable handle to an append-only event log
#[derive(Clone)]
pub struct EventSink {
    inner: Arc<SinkInner>,
}

impl EventSink {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(SINK_BROADCAST_CAPACITY);
        Self {
            inner: Arc::new(SinkInner {
                log: RwLock::new(Vec::new()),
                reported: AtomicU64::new(0),
                updates,
            }),
        }
    }

    /// Append a timestamped event and notify subscribers
    ///
    /// The broadcast happens under the log lock, so subscribers see appends
    /// and clears in log order.
    pub fn report(&self, message: impl Into<String>) {
        let text = message.into();
        let mut log = self.inner.log.write();
        let seq = self.inner.reported.fetch_add(1, Ordering::SeqCst) + 1;
        let event = LogEvent::now(seq, text);
        log.push(event.clone());

        tracing::debug!(seq = event.seq, text = %event.text, "event reported");
        // No subscribers is not an error
        let _ = self.inner.updates.send(SinkUpdate::Appended(event));
    }

    /// Drop every logged event
    pub fn clear(&self) {
        let mut log = self.inner.log.write();
        log.clear();
        let _ = self.inner.updates.send(SinkUpdate::Cleared);
    }

    /// Snapshot of the log in report order
    pub fn events(&self) -> Vec<LogEvent> {
        self.inner.log.read().clone()
    }

    /// Snapshot of the message texts in report order
    pub fn texts(&self) -> Vec<String> {
        self.inner.log.read().iter().map(|e| e.text.clone()).collect()
    }

    /// Rendered `[HH:MM:SS] text` lines in report order
    pub fn lines(&self) -> Vec<String> {
        self.inner.log.read().iter().map(LogEvent::render).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.log.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.log.read().is_empty()
    }

    /// Number of reports since this sink was created
    pub fn report_count(&self) -> u64 {
        self.inner.reported.load(Ordering::SeqCst)
    }

    /// Live feed of appends and clears from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<SinkUpdate> {
        self.inner.updates.subscribe()
    }
}

impl Default for EventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("events", &self.len())
            .field("reported", &self.report_count())
            .field("subscribers", &self.inner.updates.receiver_count())
            .finish()
    }
}
