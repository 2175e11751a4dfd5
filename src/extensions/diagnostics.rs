use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Reason a sample was dropped before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleDiagnostic {
    /// Value text is not a number.
    ParseFailure {
        label: String,
        value: String,
        reason: String,
    },
    /// Producer attached an error instead of a reading.
    SourceError { label: String, message: String },
    /// No line registered under this label.
    UnknownLabel { label: String },
}

impl SampleDiagnostic {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::ParseFailure { label, .. }
            | Self::SourceError { label, .. }
            | Self::UnknownLabel { label } => label,
        }
    }
}

/// Receiver for dropped-sample notifications, e.g. an operator alert area.
///
/// Called while the chart lock is held; implementations must not call back
/// into the chart.
pub trait DiagnosticsSink: Send {
    fn report(&mut self, diagnostic: &SampleDiagnostic);
}

/// Bounded in-memory sink shared between the chart and a host UI.
#[derive(Debug, Clone)]
pub struct DiagnosticsLog {
    entries: Arc<Mutex<VecDeque<SampleDiagnostic>>>,
    capacity: usize,
}

impl Default for DiagnosticsLog {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

impl DiagnosticsLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.clamp(1, 64)))),
            capacity: capacity.max(1),
        }
    }

    /// Most recent diagnostics, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<SampleDiagnostic> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&self) -> Vec<SampleDiagnostic> {
        self.entries.lock().drain(..).collect()
    }
}

impl DiagnosticsSink for DiagnosticsLog {
    fn report(&mut self, diagnostic: &SampleDiagnostic) {
        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(diagnostic.clone());
    }
}
