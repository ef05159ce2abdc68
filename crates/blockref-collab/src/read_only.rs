//! A shared latch the whole engine trips into once any component hits an
//! unrecoverable I/O or corruption error, after which every write-path
//! operation must refuse rather than risk making things worse.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use blockref_types::BlockRefError;

struct ReadOnlyState {
    tripped: AtomicBool,
    cause: OnceLock<BlockRefError>,
}

/// Cloning a `ReadOnlyNotifier` shares the same underlying latch; every
/// consumer that can observe or cause a fatal error should hold a clone.
#[derive(Clone)]
pub struct ReadOnlyNotifier {
    state: Arc<ReadOnlyState>,
}

impl Default for ReadOnlyNotifier {
    fn default() -> Self {
        Self {
            state: Arc::new(ReadOnlyState {
                tripped: AtomicBool::new(false),
                cause: OnceLock::new(),
            }),
        }
    }
}

impl ReadOnlyNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_read_only(&self) -> bool {
        self.state.tripped.load(Ordering::Acquire)
    }

    /// Trips the latch if it isn't already tripped. Only the first cause is
    /// retained; later calls are no-ops beyond re-asserting the flag.
    pub fn enter_read_only_mode(&self, cause: BlockRefError) {
        if !self.state.tripped.swap(true, Ordering::AcqRel) {
            let _ = self.state.cause.set(cause);
            tracing::error!("entering read-only mode");
        }
    }

    pub fn cause(&self) -> Option<&BlockRefError> {
        self.state.cause.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_writable() {
        let notifier = ReadOnlyNotifier::new();
        assert!(!notifier.is_read_only());
        assert!(notifier.cause().is_none());
    }

    #[test]
    fn tripping_is_visible_to_clones() {
        let notifier = ReadOnlyNotifier::new();
        let clone = notifier.clone();
        notifier.enter_read_only_mode(BlockRefError::Internal("boom"));
        assert!(clone.is_read_only());
        assert!(matches!(clone.cause(), Some(BlockRefError::Internal(_))));
    }

    #[test]
    fn only_first_cause_is_kept() {
        let notifier = ReadOnlyNotifier::new();
        notifier.enter_read_only_mode(BlockRefError::Internal("first"));
        notifier.enter_read_only_mode(BlockRefError::Internal("second"));
        assert!(matches!(
            notifier.cause(),
            Some(BlockRefError::Internal("first"))
        ));
    }
}
