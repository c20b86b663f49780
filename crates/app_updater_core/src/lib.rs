//! Host-agnostic core of the App Updater native bootstrap.
//!
//! The `app_updater_ffi` crate owns the exported load symbols; everything
//! here takes the runtime handle as a plain parameter so it runs without a
//! host runtime present.

pub mod bridge;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod logging;
pub mod registration;
pub mod status;

pub use bridge::{BootstrapBridge, BootstrapReport, LoadState};
pub use config::{BootstrapConfig, ConfigError, DEFAULT_COMPONENT_TAG};
pub use diagnostics::{
    DiagnosticError, DiagnosticRecord, DiagnosticSink, LogSink, NullSink, Severity,
};
pub use error::BootstrapError;
pub use handle::RuntimeHandle;
pub use logging::{init_logging, logging_status};
pub use registration::ModuleRegistration;
pub use status::StatusCode;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
