//! The provisional-reservation handle threaded through `adjust` calls.
//!
//! The original source both sets a decremented counter back to `PROVISIONAL`
//! and re-asserts the lock's provisional flag in the same code path; this
//! type makes that assertion an idempotent setter so doing it twice is safe
//! by construction rather than by caller discipline.
use std::cell::Cell;

#[derive(Default)]
pub struct AllocationLock {
    provisionally_referenced: Cell<bool>,
}

impl AllocationLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign_provisional_reference(&self) {
        self.provisionally_referenced.set(true);
    }

    pub fn unassign_provisional_reference(&self) {
        self.provisionally_referenced.set(false);
    }

    pub fn is_provisionally_referenced(&self) -> bool {
        self.provisionally_referenced.get()
    }
}
