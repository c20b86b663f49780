//! Serializable snapshot of bridge activity.

use crate::bridge::state::LoadState;
use crate::status::StatusCode;
use serde::Serialize;

/// Point-in-time view of one bootstrap bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub component_tag: String,
    pub core_version: &'static str,
    pub load_state: LoadState,
    /// Load notifications received, including rejected ones.
    pub load_attempts: u32,
    /// Status returned for the most recent load notification.
    pub last_status: Option<StatusCode>,
}
