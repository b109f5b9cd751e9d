//! Status reporting
//!
//! The sweep controller never touches a UI directly: it emits transient
//! `StatusMessage`s through a `StatusSink`, and rendering is the sink's
//! problem. The CLI routes messages to `tracing`; tests collect them in
//! memory and assert on the sequence.

use serde::Serialize;
use std::sync::Mutex;

/// Severity class of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient user-facing status update
#[derive(Debug, Clone, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink for status messages emitted by the sweep controller
pub trait StatusSink: Send + Sync {
    fn emit(&self, message: StatusMessage);
}

/// Sink that routes status messages to `tracing` at matching levels
#[derive(Debug, Default)]
pub struct TracingStatusSink;

impl StatusSink for TracingStatusSink {
    fn emit(&self, message: StatusMessage) {
        match message.severity {
            Severity::Info => tracing::info!(status = %message.text),
            Severity::Success => tracing::info!(status = %message.text, "ok"),
            Severity::Error => tracing::error!(status = %message.text),
        }
    }
}

/// Sink that collects messages in order, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStatusSink {
    messages: Mutex<Vec<StatusMessage>>,
}

impl MemoryStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn messages(&self) -> Vec<StatusMessage> {
        self.messages.lock().expect("status sink poisoned").clone()
    }

    /// The most recent message, if any
    pub fn last(&self) -> Option<StatusMessage> {
        self.messages
            .lock()
            .expect("status sink poisoned")
            .last()
            .cloned()
    }
}

impl StatusSink for MemoryStatusSink {
    fn emit(&self, message: StatusMessage) {
        self.messages
            .lock()
            .expect("status sink poisoned")
            .push(message);
    }
}
