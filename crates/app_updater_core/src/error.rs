//! Bootstrap failure taxonomy.

use crate::status::StatusCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a load attempt did not make the module usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// Host passed a null runtime handle.
    InvalidHandle,
    /// A previous load succeeded and no unload was delivered.
    AlreadyLoaded,
    /// Registration routine returned a failure code.
    RegistrationFailed(StatusCode),
    /// Registration routine panicked; payload is sanitized.
    RegistrationPanicked(String),
}

impl BootstrapError {
    /// Status code reported to the host for this failure.
    ///
    /// `RegistrationFailed` carries the routine's own code unchanged.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidHandle => StatusCode::INVALID_HANDLE,
            Self::AlreadyLoaded => StatusCode::ALREADY_LOADED,
            Self::RegistrationFailed(status) => *status,
            Self::RegistrationPanicked(_) => StatusCode::INTERNAL_FAULT,
        }
    }
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHandle => write!(f, "runtime handle is null"),
            Self::AlreadyLoaded => write!(f, "module already registered for this load"),
            Self::RegistrationFailed(status) => {
                write!(f, "module registration failed with status {status}")
            }
            Self::RegistrationPanicked(payload) => {
                write!(f, "module registration panicked: {payload}")
            }
        }
    }
}

impl Error for BootstrapError {}

#[cfg(test)]
mod tests {
    use super::BootstrapError;
    use crate::StatusCode;

    #[test]
    fn registration_failure_keeps_routine_code() {
        let err = BootstrapError::RegistrationFailed(StatusCode::new(-17));
        assert_eq!(err.status(), StatusCode::new(-17));
        assert!(err.to_string().contains("-17"));
    }

    #[test]
    fn bridge_failures_map_to_reserved_codes() {
        assert_eq!(
            BootstrapError::InvalidHandle.status(),
            StatusCode::INVALID_HANDLE
        );
        assert_eq!(
            BootstrapError::AlreadyLoaded.status(),
            StatusCode::ALREADY_LOADED
        );
        assert_eq!(
            BootstrapError::RegistrationPanicked("boom".to_string()).status(),
            StatusCode::INTERNAL_FAULT
        );
    }
}
