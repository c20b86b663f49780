//! Opaque runtime handle forwarded from the host to the registration routine.
//!
//! # Invariants
//! - A handle is never null.
//! - A handle borrows the load call: the `'call` lifetime keeps it from being
//!   stored past the notification that produced it.
//! - Core code never dereferences the pointer.

use std::ffi::c_void;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Non-owned capability token for the host runtime environment.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuntimeHandle<'call> {
    raw: NonNull<c_void>,
    _call: PhantomData<&'call c_void>,
}

impl<'call> RuntimeHandle<'call> {
    /// Wraps a host-supplied pointer. Returns `None` for null.
    pub fn from_raw(raw: *mut c_void) -> Option<Self> {
        NonNull::new(raw).map(|raw| Self {
            raw,
            _call: PhantomData,
        })
    }

    /// Raw pointer for the registration routine to reinterpret.
    pub fn as_ptr(self) -> *mut c_void {
        self.raw.as_ptr()
    }
}

impl Debug for RuntimeHandle<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RuntimeHandle").field(&self.raw).finish()
    }
}
