//! JNI registration routine invoked by `JNI_OnLoad`.
//!
//! # Responsibility
//! - Reinterpret the opaque runtime handle as the host `JavaVM`.
//! - Install the native methods of the Kotlin bridge class.
//!
//! # Invariants
//! - Returns `JNI_VERSION_1_6` on success and `JNI_ERR` on failure.
//! - Never leaves a pending Java exception behind.
//! - Does not block, spawn threads or retain the `JavaVM`.

use crate::api;
use app_updater_core::{ModuleRegistration, RuntimeHandle, StatusCode};
use jni::sys::{jint, JNI_ERR, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM, NativeMethod};
use log::{error, info};
use std::error::Error;
use std::ffi::c_void;
use std::fmt::{Display, Formatter};

/// Binary name of the class whose `native` methods are bound here.
pub const BRIDGE_CLASS: &str = "com/minhnc/appupdater/AppUpdaterNative";

/// `(name, JNI signature)` of every method bound on [`BRIDGE_CLASS`].
pub const NATIVE_METHOD_SPECS: &[(&str, &str)] = &[
    ("nativeCoreVersion", "()Ljava/lang/String;"),
    (
        "nativeInitLogging",
        "(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;",
    ),
    ("nativeBootstrapReport", "()Ljava/lang/String;"),
];

/// Registration routine backed by `RegisterNatives`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JniModuleRegistration;

impl ModuleRegistration for JniModuleRegistration {
    fn register(&self, handle: RuntimeHandle<'_>) -> StatusCode {
        match register_natives(handle) {
            Ok(()) => {
                info!(
                    "event=register_natives module=ffi status=ok class={BRIDGE_CLASS} methods={}",
                    NATIVE_METHOD_SPECS.len()
                );
                StatusCode::new(JNI_VERSION_1_6)
            }
            Err(err) => {
                error!(
                    "event=register_natives module=ffi status=error class={BRIDGE_CLASS} reason={err}"
                );
                StatusCode::new(JNI_ERR)
            }
        }
    }
}

/// Failures while binding native methods.
#[derive(Debug)]
pub enum RegistrationError {
    Jni(jni::errors::Error),
    UnsupportedVersion(jint),
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jni(err) => write!(f, "jni call failed: {err}"),
            Self::UnsupportedVersion(version) => {
                write!(f, "jni version {version:#x} is older than 1.6")
            }
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Jni(err) => Some(err),
            Self::UnsupportedVersion(_) => None,
        }
    }
}

impl From<jni::errors::Error> for RegistrationError {
    fn from(err: jni::errors::Error) -> Self {
        Self::Jni(err)
    }
}

fn register_natives(handle: RuntimeHandle<'_>) -> Result<(), RegistrationError> {
    // SAFETY: the handle is built by `JNI_OnLoad` from the host's live
    // `JavaVM*`, and only used for the duration of this call.
    let vm = unsafe { JavaVM::from_raw(handle.as_ptr().cast()) }?;
    let mut env = vm.get_env()?;

    let version: jint = env.get_version()?.into();
    if version < JNI_VERSION_1_6 {
        return Err(RegistrationError::UnsupportedVersion(version));
    }

    let result = bind_bridge_class(&mut env);
    if result.is_err() && env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
    result
}

fn bind_bridge_class(env: &mut JNIEnv<'_>) -> Result<(), RegistrationError> {
    let class = env.find_class(BRIDGE_CLASS)?;
    env.register_native_methods(&class, &native_methods())?;
    Ok(())
}

fn native_methods() -> Vec<NativeMethod> {
    NATIVE_METHOD_SPECS
        .iter()
        .map(|(name, sig)| NativeMethod {
            name: (*name).into(),
            sig: (*sig).into(),
            fn_ptr: native_fn_ptr(name),
        })
        .collect()
}

fn native_fn_ptr(name: &str) -> *mut c_void {
    match name {
        "nativeCoreVersion" => api::native_core_version as *mut c_void,
        "nativeInitLogging" => api::native_init_logging as *mut c_void,
        "nativeBootstrapReport" => api::native_bootstrap_report as *mut c_void,
        _ => std::ptr::null_mut(),
    }
}

#[cfg(test)]
mod tests {
    use super::{native_fn_ptr, RegistrationError, NATIVE_METHOD_SPECS};
    use std::collections::BTreeSet;

    #[test]
    fn every_method_spec_has_an_implementation() {
        for (name, _) in NATIVE_METHOD_SPECS {
            assert!(!native_fn_ptr(name).is_null(), "missing fn for {name}");
        }
        assert!(native_fn_ptr("nativeUnknown").is_null());
    }

    #[test]
    fn method_names_are_unique_and_signatures_return_strings() {
        let names: BTreeSet<&str> = NATIVE_METHOD_SPECS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), NATIVE_METHOD_SPECS.len());
        for (_, sig) in NATIVE_METHOD_SPECS {
            assert!(sig.ends_with(")Ljava/lang/String;"));
        }
    }

    #[test]
    fn unsupported_version_message_is_hex() {
        let err = RegistrationError::UnsupportedVersion(0x0001_0002);
        assert!(err.to_string().contains("0x10002"));
    }
}
