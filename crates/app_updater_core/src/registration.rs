//! Module registration routine contract.
//!
//! The routine is the only coupling point between the bootstrap bridge and the
//! module's real functionality. Implementations must:
//! - return without blocking and in bounded time;
//! - leave the host runtime consistent when they fail part-way;
//! - tolerate being called once per load event, never more.

use crate::handle::RuntimeHandle;
use crate::status::StatusCode;

/// Installs the module's native bindings using the host runtime handle.
pub trait ModuleRegistration {
    fn register(&self, handle: RuntimeHandle<'_>) -> StatusCode;
}

impl<F> ModuleRegistration for F
where
    F: Fn(RuntimeHandle<'_>) -> StatusCode,
{
    fn register(&self, handle: RuntimeHandle<'_>) -> StatusCode {
        self(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::ModuleRegistration;
    use crate::{RuntimeHandle, StatusCode};
    use std::ffi::c_void;
    use std::ptr::NonNull;

    #[test]
    fn closures_act_as_registration_routines() {
        let routine = |_handle: RuntimeHandle<'_>| StatusCode::new(7);
        let handle =
            RuntimeHandle::from_raw(NonNull::<c_void>::dangling().as_ptr()).expect("handle");
        assert_eq!(routine.register(handle), StatusCode::new(7));
    }
}
