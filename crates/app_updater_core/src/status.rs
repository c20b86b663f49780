//! Status codes returned across the host load boundary.
//!
//! # Invariants
//! - Non-negative codes are success (`0`, or a host version sentinel such as
//!   `JNI_VERSION_1_6`).
//! - Negative codes are failures and are forwarded to the host untouched.
//! - Bridge-originated failures reuse the JNI error table values.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Integer status crossing the host calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct StatusCode(i32);

impl StatusCode {
    /// Plain success sentinel.
    pub const SUCCESS: Self = Self(0);
    /// Registration routine panicked (`JNI_ERR`).
    pub const INTERNAL_FAULT: Self = Self(-1);
    /// Load delivered twice without an unload in between (`JNI_EEXIST`).
    pub const ALREADY_LOADED: Self = Self(-5);
    /// Host passed a null runtime handle (`JNI_EINVAL`).
    pub const INVALID_HANDLE: Self = Self(-6);

    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    pub const fn code(self) -> i32 {
        self.0
    }

    pub const fn is_success(self) -> bool {
        self.0 >= 0
    }

    pub const fn is_failure(self) -> bool {
        !self.is_success()
    }
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<StatusCode> for i32 {
    fn from(status: StatusCode) -> Self {
        status.0
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
