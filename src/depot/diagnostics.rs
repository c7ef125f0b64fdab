//! Diagnostic sink for provider operations.
//!
//! Providers report remote-service failures as return values, not errors;
//! the human-readable explanation goes through an injected [`DiagnosticSink`]
//! so the CLI can surface it and tests can capture it deterministically.

use std::sync::Mutex;

/// Receives diagnostics emitted by depot providers.
pub trait DiagnosticSink {
    /// A user-facing message (depot name, location, HTTP status).
    fn notice(&self, message: &str);

    /// Secondary-verbosity detail (full response bodies, asset URLs).
    fn debug(&self, message: &str);
}

/// Production sink forwarding to `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn notice(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}

/// Capturing sink for tests.
#[derive(Debug, Default)]
pub struct CapturedSink {
    notices: Mutex<Vec<String>>,
    debugs: Mutex<Vec<String>>,
}

impl CapturedSink {
    /// Create an empty capturing sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices emitted so far.
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    /// All debug messages emitted so far.
    pub fn debugs(&self) -> Vec<String> {
        self.debugs.lock().unwrap().clone()
    }
}

impl DiagnosticSink for CapturedSink {
    fn notice(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn debug(&self, message: &str) {
        self.debugs.lock().unwrap().push(message.to_string());
    }
}
