//! Diagnostics side channel.
//!
//! Loaders never log through a hidden global. They are handed a
//! [`Diagnostics`] implementation and report through it; the default
//! [`TracingDiagnostics`] forwards everything to `tracing`.

use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// The matching `tracing` level.
    pub fn level(self) -> Level {
        match self {
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warn => Level::WARN,
            Severity::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// Receiver for informational and error messages produced during an import.
pub trait Diagnostics {
    /// Report a formatted message at the given severity.
    fn report(&self, severity: Severity, message: &str);

    fn debug(&self, message: &str) {
        self.report(Severity::Debug, message);
    }

    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Severity::Warn, message);
    }

    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }
}

/// Forwards diagnostics to the `tracing` subscriber installed by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!("{}", message),
            Severity::Info => tracing::info!("{}", message),
            Severity::Warn => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
    }
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Records every diagnostic in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Messages reported at exactly `severity`.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.clone())
            .collect()
    }

    /// Whether any message at `Error` severity was reported.
    pub fn has_errors(&self) -> bool {
        self.entries
            .lock()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Remove and return all recorded diagnostics.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn report(&self, severity: Severity, message: &str) {
        self.entries.lock().push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn report(&self, severity: Severity, message: &str) {
        (**self).report(severity, message);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for std::sync::Arc<D> {
    fn report(&self, severity: Severity, message: &str) {
        (**self).report(severity, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn collects_in_order() {
        let diagnostics = CollectedDiagnostics::new();
        diagnostics.info("first");
        diagnostics.error("second");
        let entries = diagnostics.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity, Severity::Info);
        assert_eq!(entries[1].message, "second");
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn filter_by_severity() {
        let diagnostics = CollectedDiagnostics::new();
        diagnostics.info("a");
        diagnostics.warn("b");
        diagnostics.info("c");
        assert_eq!(diagnostics.messages(Severity::Info), vec!["a", "c"]);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn drain_empties() {
        let diagnostics = CollectedDiagnostics::new();
        diagnostics.debug("x");
        assert_eq!(diagnostics.drain().len(), 1);
        assert!(diagnostics.entries().is_empty());
    }

    #[test]
    fn shared_through_arc() {
        let shared = Arc::new(CollectedDiagnostics::new());
        let sink: Box<dyn Diagnostics> = Box::new(Arc::clone(&shared));
        sink.warn("through the box");
        assert_eq!(shared.messages(Severity::Warn), vec!["through the box"]);
    }

    #[test]
    fn severity_ordering_and_levels() {
        assert!(Severity::Debug < Severity::Error);
        assert_eq!(Severity::Warn.level(), Level::WARN);
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
