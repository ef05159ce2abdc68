#![forbid(unsafe_code)]

//! A plain FIFO queue for callers waiting on a contended resource, plus a
//! blocking notification barrier used by the descriptor pool.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

/// Analogous to the original engine's `waiter` list: a simple ordered queue
/// of pending requests with no intrinsic wakeup mechanism of its own. The
/// owner is expected to drain it from a single-threaded context.
pub struct WaitQueue<T> {
    entries: VecDeque<T>,
}

impl<T> Default for WaitQueue<T> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<T> WaitQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, item: T) {
        self.entries.push_back(item);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Hands every waiter to `notify` in FIFO order, leaving the queue empty.
    pub fn notify_all(&mut self, mut notify: impl FnMut(T)) {
        while let Some(item) = self.entries.pop_front() {
            notify(item);
        }
    }
}

/// A one-shot completion signal a background worker can use to wake a caller
/// blocked on a slow operation (e.g. a full descriptor pool).
pub struct Outcome<T> {
    inner: Arc<(Mutex<Option<T>>, Condvar)>,
}

impl<T> Clone for Outcome<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new((Mutex::new(None), Condvar::new())),
        }
    }
}

impl<T> Outcome<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&self, value: T) {
        let (lock, cvar) = &*self.inner;
        let mut slot = lock.lock();
        *slot = Some(value);
        cvar.notify_all();
    }

    pub fn wait(&self) -> T {
        let (lock, cvar) = &*self.inner;
        let mut slot = lock.lock();
        loop {
            if let Some(value) = slot.take() {
                return value;
            }
            cvar.wait(&mut slot);
        }
    }
}
