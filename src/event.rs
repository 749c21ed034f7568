//! Ordered event channel funneling status reports from concurrent actors
//! to a single logging consumer.
//!
//! Background workers never log directly: they send [`Event`]s through a
//! bounded channel, and exactly one consumer task turns them into log
//! lines. That gives a total order of emitted lines across all producers
//! with no interleaved partial writes.

use tokio::sync::mpsc;

/// Default channel capacity.
///
/// Generous for the expected event rate; filling the channel makes
/// producers await (a backpressure safety valve), it is not the normal
/// path.
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// One status report from a concurrent actor.
#[derive(Debug, Clone)]
pub struct Event {
    pub severity: Severity,
    pub text: String,
    /// Name of the producing component, carried into the log line.
    pub source: &'static str,
}

impl Event {
    pub fn debug(text: impl Into<String>, source: &'static str) -> Self {
        Self { severity: Severity::Debug, text: text.into(), source }
    }

    pub fn info(text: impl Into<String>, source: &'static str) -> Self {
        Self { severity: Severity::Info, text: text.into(), source }
    }

    pub fn warning(text: impl Into<String>, source: &'static str) -> Self {
        Self { severity: Severity::Warning, text: text.into(), source }
    }

    pub fn error(text: impl Into<String>, source: &'static str) -> Self {
        Self { severity: Severity::Error, text: text.into(), source }
    }
}

/// Sending half of the event channel. Cheap to clone, one per producer.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<Event>,
}

impl EventSender {
    /// Send one event, preserving this producer's send order.
    ///
    /// Awaits if the channel is at capacity. A closed channel (consumer
    /// gone during process teardown) drops the event silently; status
    /// reporting is best-effort by then.
    pub async fn send(&self, event: Event) {
        let _ = self.tx.send(event).await;
    }
}

pub type EventReceiver = mpsc::Receiver<Event>;

/// Create a bounded event channel.
pub fn event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender { tx }, rx)
}

/// Drain the channel for the life of the process, emitting one log line
/// per event.
///
/// This is the only place events reach the logger, so consumer order is
/// log order. The loop ends when every sender has been dropped; there is
/// no other end-of-life signal.
pub async fn run_consumer(mut rx: EventReceiver) {
    while let Some(event) = rx.recv().await {
        match event.severity {
            Severity::Debug => tracing::debug!(source = event.source, "{}", event.text),
            Severity::Info => tracing::info!(source = event.source, "{}", event.text),
            Severity::Warning => tracing::warn!(source = event.source, "{}", event.text),
            Severity::Error => tracing::error!(source = event.source, "{}", event.text),
        }
    }
}
