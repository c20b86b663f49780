//! JNI entry points for the App Updater native library.
//!
//! # Responsibility
//! - Export the host-discoverable `JNI_OnLoad` / `JNI_OnUnload` symbols.
//! - Forward each notification to the process-wide bootstrap bridge.
//!
//! # Invariants
//! - Exported symbols never unwind into the JVM.
//! - `JNI_OnLoad` returns the registration status unchanged.

pub mod api;
pub mod registration;

use app_updater_core::{BootstrapBridge, BootstrapConfig, LogSink, RuntimeHandle, StatusCode};
use jni::sys::{jint, JavaVM};
use once_cell::sync::Lazy;
use registration::JniModuleRegistration;
use std::ffi::c_void;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub use registration::{BRIDGE_CLASS, NATIVE_METHOD_SPECS};

type ProcessBridge = BootstrapBridge<LogSink, JniModuleRegistration>;

static BOOTSTRAP_BRIDGE: Lazy<ProcessBridge> = Lazy::new(|| {
    BootstrapBridge::new(BootstrapConfig::default(), LogSink, JniModuleRegistration)
});

pub(crate) fn bootstrap_bridge() -> &'static ProcessBridge {
    &BOOTSTRAP_BRIDGE
}

/// Called by the JVM after `System.loadLibrary`.
///
/// Returns the JNI version from registration, or a negative JNI error code.
/// Any fault escaping the bridge is reported as `JNI_ERR`.
#[allow(non_snake_case)]
#[no_mangle]
pub extern "system" fn JNI_OnLoad(vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    load_guarded(|| bootstrap_bridge().on_library_load(RuntimeHandle::from_raw(vm.cast())))
}

/// Called by the JVM when the defining class loader is collected.
#[allow(non_snake_case)]
#[no_mangle]
pub extern "system" fn JNI_OnUnload(_vm: *mut JavaVM, _reserved: *mut c_void) {
    let _ = catch_unwind(|| bootstrap_bridge().on_library_unload());
}

fn load_guarded(load: impl FnOnce() -> StatusCode) -> jint {
    catch_unwind(AssertUnwindSafe(load))
        .unwrap_or(StatusCode::INTERNAL_FAULT)
        .code()
}

#[cfg(test)]
mod tests {
    use super::load_guarded;
    use app_updater_core::StatusCode;

    #[test]
    fn load_guard_passes_status_through() {
        assert_eq!(load_guarded(|| StatusCode::new(-1)), -1);
        assert_eq!(load_guarded(|| StatusCode::new(0x0001_0006)), 0x0001_0006);
    }

    #[test]
    fn load_guard_turns_escaped_panic_into_internal_fault() {
        let status = load_guarded(|| panic!("bridge fault"));
        assert_eq!(status, StatusCode::INTERNAL_FAULT.code());
    }
}
