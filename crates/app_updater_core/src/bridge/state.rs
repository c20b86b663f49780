//! Load lifecycle state shared by the load and unload notifications.
//!
//! # Invariants
//! - Every transition is a compare-exchange from one expected state:
//!   `Unloaded -> Loading -> Loaded | Unloaded`, and `Loaded -> Unloaded`.
//! - Unload only releases a finished load; an unload that observes
//!   `Loading` is ignored, so a running registration always settles the state.

use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of one loaded library instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// No successful registration is active.
    Unloaded,
    /// Registration routine is running.
    Loading,
    /// Registration succeeded; the module is usable.
    Loaded,
}

impl LoadState {
    fn to_u8(self) -> u8 {
        match self {
            Self::Unloaded => 0,
            Self::Loading => 1,
            Self::Loaded => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        debug_assert!(value <= 2, "corrupt load state byte {value}");
        match value {
            0 => Self::Unloaded,
            1 => Self::Loading,
            2 => Self::Loaded,
            _ => Self::Unloaded,
        }
    }
}

/// Lock-free cell holding a [`LoadState`].
#[derive(Debug)]
pub(crate) struct AtomicLoadState(AtomicU8);

impl AtomicLoadState {
    pub(crate) fn new(state: LoadState) -> Self {
        Self(AtomicU8::new(state.to_u8()))
    }

    pub(crate) fn load(&self) -> LoadState {
        LoadState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Moves `Unloaded -> Loading`. Returns the observed state on conflict.
    pub(crate) fn begin_loading(&self) -> Result<(), LoadState> {
        self.transition(LoadState::Unloaded, LoadState::Loading)
    }

    /// Settles a running load: `Loading -> Loaded` on success, otherwise
    /// `Loading -> Unloaded`.
    pub(crate) fn finish_loading(&self, succeeded: bool) -> Result<(), LoadState> {
        let target = if succeeded {
            LoadState::Loaded
        } else {
            LoadState::Unloaded
        };
        self.transition(LoadState::Loading, target)
    }

    /// Moves `Loaded -> Unloaded`. Returns the observed state otherwise.
    pub(crate) fn release(&self) -> Result<(), LoadState> {
        self.transition(LoadState::Loaded, LoadState::Unloaded)
    }

    fn transition(&self, from: LoadState, to: LoadState) -> Result<(), LoadState> {
        self.0
            .compare_exchange(from.to_u8(), to.to_u8(), Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(LoadState::from_u8)
    }
}

#[cfg(test)]
mod tests {
    use super::{AtomicLoadState, LoadState};

    #[test]
    fn begin_loading_only_from_unloaded() {
        let state = AtomicLoadState::new(LoadState::Unloaded);
        state.begin_loading().expect("first transition");
        assert_eq!(state.load(), LoadState::Loading);
        assert_eq!(state.begin_loading(), Err(LoadState::Loading));

        state.finish_loading(true).expect("settle load");
        assert_eq!(state.begin_loading(), Err(LoadState::Loaded));
    }

    #[test]
    fn unload_during_loading_is_ignored_and_load_settles() {
        let state = AtomicLoadState::new(LoadState::Unloaded);
        state.begin_loading().expect("start load");

        assert_eq!(state.release(), Err(LoadState::Loading));
        assert_eq!(state.load(), LoadState::Loading);

        state.finish_loading(true).expect("load settles after ignored unload");
        assert_eq!(state.load(), LoadState::Loaded);

        state.release().expect("unload after settled load");
        assert_eq!(state.load(), LoadState::Unloaded);
    }

    #[test]
    fn failed_load_returns_to_unloaded_and_release_is_a_no_op() {
        let state = AtomicLoadState::new(LoadState::Unloaded);
        state.begin_loading().expect("start load");
        state.finish_loading(false).expect("settle failed load");
        assert_eq!(state.load(), LoadState::Unloaded);

        assert_eq!(state.release(), Err(LoadState::Unloaded));
        assert_eq!(state.finish_loading(true), Err(LoadState::Unloaded));
    }

    #[test]
    fn known_bytes_decode_to_their_states() {
        for state in [LoadState::Unloaded, LoadState::Loading, LoadState::Loaded] {
            assert_eq!(LoadState::from_u8(state.to_u8()), state);
        }
    }
}
