//! Native methods installed on the Kotlin bridge class.
//!
//! # Responsibility
//! - Expose small health and logging calls to the managed side.
//! - Keep each JNI wrapper a thin shell over a plain Rust function.
//!
//! # Invariants
//! - Exported functions must not unwind across the JNI boundary.
//! - A contained panic or JNI failure surfaces as a `null` string.

use crate::bootstrap_bridge;
use app_updater_core::{core_version as core_version_inner, init_logging as init_logging_inner};
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use log::error;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

/// Core crate version.
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes native file logging once per process.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Bootstrap report of the process-wide bridge as JSON.
pub fn bootstrap_report() -> String {
    match serde_json::to_string(&bootstrap_bridge().report()) {
        Ok(json) => json,
        Err(err) => format!("{{\"error\":\"report serialization failed: {err}\"}}"),
    }
}

/// `String nativeCoreVersion()`
pub(crate) extern "system" fn native_core_version<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    let outcome = catch_unwind(core_version);
    into_jstring(&mut env, "nativeCoreVersion", outcome)
}

/// `String nativeInitLogging(String level, String logDir)`
pub(crate) extern "system" fn native_init_logging<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    level: JString<'local>,
    log_dir: JString<'local>,
) -> jstring {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let level = match read_string(&mut env, &level) {
            Ok(value) => value,
            Err(err) => return format!("invalid level argument: {err}"),
        };
        let log_dir = match read_string(&mut env, &log_dir) {
            Ok(value) => value,
            Err(err) => return format!("invalid log_dir argument: {err}"),
        };
        init_logging(level, log_dir)
    }));
    into_jstring(&mut env, "nativeInitLogging", outcome)
}

/// `String nativeBootstrapReport()`
pub(crate) extern "system" fn native_bootstrap_report<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    let outcome = catch_unwind(bootstrap_report);
    into_jstring(&mut env, "nativeBootstrapReport", outcome)
}

fn read_string(env: &mut JNIEnv<'_>, value: &JString<'_>) -> jni::errors::Result<String> {
    if value.is_null() {
        return Err(jni::errors::Error::NullPtr("string argument"));
    }
    Ok(env.get_string(value)?.into())
}

fn into_jstring(
    env: &mut JNIEnv<'_>,
    method: &'static str,
    outcome: std::thread::Result<String>,
) -> jstring {
    let value = match outcome {
        Ok(value) => value,
        Err(_) => {
            error!("event=native_call module=ffi status=panicked method={method}");
            return ptr::null_mut();
        }
    };
    match env.new_string(value) {
        Ok(string) => string.into_raw(),
        Err(err) => {
            error!("event=native_call module=ffi status=error method={method} reason={err}");
            ptr::null_mut()
        }
    }
}
