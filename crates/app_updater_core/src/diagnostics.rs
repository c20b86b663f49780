//! Diagnostic sink used by the bootstrap bridge.
//!
//! # Responsibility
//! - Carry human-readable, tagged records to an injected sink.
//! - Keep the process-wide `log` facade behind a replaceable seam.
//!
//! # Invariants
//! - Emission is best-effort: callers must never gate control flow on it.

use log::Level;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    fn log_level(self) -> Level {
        match self {
            Self::Debug => Level::Debug,
            Self::Info => Level::Info,
            Self::Warn => Level::Warn,
            Self::Error => Level::Error,
        }
    }
}

/// One diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    /// Fixed component tag, e.g. `AppUpdater`.
    pub tag: String,
    pub severity: Severity,
    pub message: String,
}

impl DiagnosticRecord {
    pub fn new(tag: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            severity,
            message: message.into(),
        }
    }

    pub fn info(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(tag, Severity::Info, message)
    }
}

/// Sink failure reported by an emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticError {
    Unavailable(String),
}

impl Display for DiagnosticError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "diagnostic sink unavailable: {reason}"),
        }
    }
}

impl Error for DiagnosticError {}

/// Destination for bootstrap diagnostics.
pub trait DiagnosticSink {
    fn emit(&self, record: &DiagnosticRecord) -> Result<(), DiagnosticError>;
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, record: &DiagnosticRecord) -> Result<(), DiagnosticError> {
        (**self).emit(record)
    }
}

/// Forwards records to the `log` facade, using the record tag as target.
///
/// Without an installed logger this is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, record: &DiagnosticRecord) -> Result<(), DiagnosticError> {
        log::log!(
            target: record.tag.as_str(),
            record.severity.log_level(),
            "{}",
            record.message
        );
        Ok(())
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _record: &DiagnosticRecord) -> Result<(), DiagnosticError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagnosticRecord, DiagnosticSink, LogSink, NullSink, Severity};

    #[test]
    fn info_constructor_sets_severity_and_tag() {
        let record = DiagnosticRecord::info("AppUpdater", "hello");
        assert_eq!(record.severity, Severity::Info);
        assert_eq!(record.tag, "AppUpdater");
        assert_eq!(record.message, "hello");
    }

    #[test]
    fn builtin_sinks_never_fail() {
        let record = DiagnosticRecord::info("AppUpdater", "no logger installed");
        LogSink.emit(&record).expect("log sink is infallible");
        NullSink.emit(&record).expect("null sink is infallible");
    }

    #[test]
    fn severity_labels_are_stable() {
        assert_eq!(Severity::Info.as_str(), "info");
        assert_eq!(Severity::Error.as_str(), "error");
    }
}
