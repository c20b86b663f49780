//! Native bootstrap bridge.
//!
//! # Responsibility
//! - Turn the host's load notification into exactly one call of the module
//!   registration routine.
//! - Report the routine's status to the host without translation.
//! - Contain every internal fault so nothing unwinds into the host.
//!
//! # Invariants
//! - The load diagnostic is emitted before the registration routine runs, and
//!   sink failures never change the returned status.
//! - A null handle short-circuits with `INVALID_HANDLE`; the routine is not
//!   called.
//! - A second load without an unload returns `ALREADY_LOADED`; the routine is
//!   not called again. Two concurrent loads race on one compare-exchange and
//!   exactly one of them runs the routine.
//! - An unload only releases a `Loaded` bridge. An unload that arrives while
//!   registration is still running is logged and ignored; the running load
//!   settles the state.
//! - Bridge-internal logging runs under `catch_unwind`: a faulting logger never
//!   changes the returned status.
//! - The runtime handle is never stored.

mod report;
mod state;

pub use report::BootstrapReport;
pub use state::LoadState;

use crate::config::{BootstrapConfig, ConfigError};
use crate::diagnostics::{DiagnosticRecord, DiagnosticSink, Severity};
use crate::error::BootstrapError;
use crate::handle::RuntimeHandle;
use crate::logging::panic_payload_text;
use crate::registration::ModuleRegistration;
use crate::status::StatusCode;
use log::{debug, error, info, warn};
use state::AtomicLoadState;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

/// Bridge between host load notifications and one registration routine.
#[derive(Debug)]
pub struct BootstrapBridge<S, R> {
    config: BootstrapConfig,
    sink: S,
    registration: R,
    state: AtomicLoadState,
    load_attempts: AtomicU32,
    last_status: Mutex<Option<StatusCode>>,
}

impl<S, R> BootstrapBridge<S, R>
where
    S: DiagnosticSink,
    R: ModuleRegistration,
{
    pub fn new(config: BootstrapConfig, sink: S, registration: R) -> Self {
        Self {
            config,
            sink,
            registration,
            state: AtomicLoadState::new(LoadState::Unloaded),
            load_attempts: AtomicU32::new(0),
            last_status: Mutex::new(None),
        }
    }

    /// Builds a bridge after validating `config`.
    pub fn try_new(config: BootstrapConfig, sink: S, registration: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, sink, registration))
    }

    /// Handles one host load notification.
    ///
    /// Returns the registration routine's status verbatim, or a reserved
    /// failure code when the bridge rejects the load before delegating.
    /// Never panics.
    pub fn on_library_load(&self, handle: Option<RuntimeHandle<'_>>) -> StatusCode {
        let status = match self.try_load(handle) {
            Ok(status) => status,
            Err(err) => {
                let status = err.status();
                contained(|| {
                    error!(
                        "event=module_register module=bootstrap status=error code={status} reason={err}"
                    )
                });
                status
            }
        };
        *self
            .last_status
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(status);
        status
    }

    /// Result-shaped core of [`Self::on_library_load`].
    ///
    /// # Errors
    /// - `InvalidHandle` when `handle` is `None`.
    /// - `AlreadyLoaded` when another load is running or still active.
    /// - `RegistrationFailed` when the routine returns a negative code.
    /// - `RegistrationPanicked` when the routine panics.
    pub fn try_load(
        &self,
        handle: Option<RuntimeHandle<'_>>,
    ) -> Result<StatusCode, BootstrapError> {
        self.load_attempts.fetch_add(1, Ordering::AcqRel);
        self.emit(Severity::Info, &self.config.load_message);

        let handle = handle.ok_or(BootstrapError::InvalidHandle)?;
        if let Err(observed) = self.state.begin_loading() {
            contained(|| {
                warn!("event=module_register module=bootstrap status=rejected state={observed:?}")
            });
            return Err(BootstrapError::AlreadyLoaded);
        }

        let outcome = catch_unwind(AssertUnwindSafe(|| self.registration.register(handle)));
        let succeeded = matches!(outcome, Ok(status) if status.is_success());
        if let Err(observed) = self.state.finish_loading(succeeded) {
            contained(|| {
                warn!("event=module_register module=bootstrap status=state_conflict state={observed:?}")
            });
        }

        match outcome {
            Ok(status) if status.is_success() => {
                contained(|| info!("event=module_register module=bootstrap status=ok code={status}"));
                Ok(status)
            }
            Ok(status) => Err(BootstrapError::RegistrationFailed(status)),
            Err(payload) => Err(BootstrapError::RegistrationPanicked(panic_payload_text(
                payload.as_ref(),
            ))),
        }
    }

    /// Handles the host unload notification.
    ///
    /// Only a `Loaded` bridge is released; an unload racing a running
    /// registration is ignored.
    pub fn on_library_unload(&self) {
        self.emit(Severity::Info, &self.config.unload_message);
        match self.state.release() {
            Ok(()) => contained(|| info!("event=module_unload module=bootstrap status=ok")),
            Err(observed) => contained(|| {
                debug!("event=module_unload module=bootstrap status=ignored state={observed:?}")
            }),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.state.load()
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn report(&self) -> BootstrapReport {
        BootstrapReport {
            component_tag: self.config.component_tag.clone(),
            core_version: crate::core_version(),
            load_state: self.load_state(),
            load_attempts: self.load_attempts.load(Ordering::Acquire),
            last_status: *self
                .last_status
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }

    fn emit(&self, severity: Severity, message: &str) {
        let record = DiagnosticRecord::new(self.config.component_tag.as_str(), severity, message);
        contained(|| {
            if let Err(err) = self.sink.emit(&record) {
                debug!("event=diagnostic_emit module=bootstrap status=dropped reason={err}");
            }
        });
    }
}

/// Runs bridge-internal logging; a panicking logger or sink is swallowed.
fn contained(log_call: impl FnOnce()) {
    let _ = catch_unwind(AssertUnwindSafe(log_call));
}

#[cfg(test)]
mod tests {
    use super::{BootstrapBridge, LoadState};
    use crate::{BootstrapConfig, NullSink, RuntimeHandle, StatusCode};
    use std::ffi::c_void;
    use std::ptr::NonNull;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn handle() -> Option<RuntimeHandle<'static>> {
        RuntimeHandle::from_raw(NonNull::<c_void>::dangling().as_ptr())
    }

    #[test]
    fn successful_load_moves_to_loaded() {
        let bridge = BootstrapBridge::new(
            BootstrapConfig::default(),
            NullSink,
            |_handle: RuntimeHandle<'_>| StatusCode::SUCCESS,
        );
        assert_eq!(bridge.on_library_load(handle()), StatusCode::SUCCESS);
        assert_eq!(bridge.load_state(), LoadState::Loaded);
    }

    #[test]
    fn failed_load_returns_to_unloaded() {
        let bridge = BootstrapBridge::new(
            BootstrapConfig::default(),
            NullSink,
            |_handle: RuntimeHandle<'_>| StatusCode::new(-3),
        );
        assert_eq!(bridge.on_library_load(handle()), StatusCode::new(-3));
        assert_eq!(bridge.load_state(), LoadState::Unloaded);
    }

    #[test]
    fn routine_sees_the_host_pointer() {
        let expected = NonNull::<c_void>::dangling().as_ptr();
        let bridge = BootstrapBridge::new(
            BootstrapConfig::default(),
            NullSink,
            move |handle: RuntimeHandle<'_>| {
                if handle.as_ptr() == expected {
                    StatusCode::SUCCESS
                } else {
                    StatusCode::new(-99)
                }
            },
        );
        assert_eq!(bridge.on_library_load(handle()), StatusCode::SUCCESS);
    }

    #[test]
    fn report_tracks_attempts_and_last_status() {
        let calls = AtomicUsize::new(0);
        let bridge = BootstrapBridge::new(
            BootstrapConfig::default(),
            NullSink,
            |_handle: RuntimeHandle<'_>| {
                calls.fetch_add(1, Ordering::SeqCst);
                StatusCode::SUCCESS
            },
        );
        assert_eq!(bridge.report().last_status, None);

        bridge.on_library_load(None);
        bridge.on_library_load(handle());

        let report = bridge.report();
        assert_eq!(report.load_attempts, 2);
        assert_eq!(report.last_status, Some(StatusCode::SUCCESS));
        assert_eq!(report.load_state, LoadState::Loaded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn try_new_rejects_invalid_config() {
        let result = BootstrapBridge::try_new(
            BootstrapConfig::default().with_component_tag(""),
            NullSink,
            |_handle: RuntimeHandle<'_>| StatusCode::SUCCESS,
        );
        assert!(result.is_err());
    }
}
