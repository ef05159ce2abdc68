//! Cross-thread-readable counters, published with relaxed ordering since all
//! updates originate from the engine's single owning thread.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct BlockRefStats {
    blocks_written: AtomicU64,
    blocks_read: AtomicU64,
    summary_updates: AtomicU64,
    load_torn_write_warnings: AtomicU64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockRefStatsSnapshot {
    pub blocks_written: u64,
    pub blocks_read: u64,
    pub summary_updates: u64,
    pub load_torn_write_warnings: u64,
}

impl BlockRefStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_block_written(&self) {
        self.blocks_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_block_read(&self) {
        self.blocks_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_summary_update(&self) {
        self.summary_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_torn_write_warning(&self) {
        self.load_torn_write_warnings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> BlockRefStatsSnapshot {
        BlockRefStatsSnapshot {
            blocks_written: self.blocks_written.load(Ordering::Relaxed),
            blocks_read: self.blocks_read.load(Ordering::Relaxed),
            summary_updates: self.summary_updates.load(Ordering::Relaxed),
            load_torn_write_warnings: self.load_torn_write_warnings.load(Ordering::Relaxed),
        }
    }
}
