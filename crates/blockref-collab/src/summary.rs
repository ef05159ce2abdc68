//! The slab summary zone collaborator: a compact, always-resident index of
//! every slab's approximate free count and clean/dirty state, used by the
//! depot to pick a slab to allocate from without loading its full reference
//! counts, and to decide whether a slab needs to be scrubbed at load time.

use std::collections::HashMap;

use blockref_types::{Result, SlabId};

/// One entry's worth of information pushed to the summary when a slab
/// becomes clean, or when its tail block moves during normal operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SummaryUpdate {
    pub slab: SlabId,
    pub tail_block_offset: u32,
    pub is_clean: bool,
    pub load_ref_counts: bool,
    pub free_block_count: u32,
}

pub trait SlabSummaryZone: Send {
    /// The journal tail block offset last published for `slab`, used to
    /// bound how much of the journal a reload must replay.
    fn tail_block_offset(&self, slab: SlabId) -> u32;

    /// Whether the summary believes `slab`'s saved reference counts are
    /// stale and must be rebuilt from the journal rather than trusted.
    fn must_load_ref_counts(&self, slab: SlabId) -> bool;

    fn update_entry(&mut self, update: SummaryUpdate) -> Result<()>;
}

#[derive(Default)]
pub struct InMemorySlabSummaryZone {
    entries: HashMap<SlabId, SummaryUpdate>,
}

impl InMemorySlabSummaryZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry as though it had been loaded from the on-disk summary,
    /// for tests that exercise the load path against a pre-existing state.
    pub fn seed(&mut self, update: SummaryUpdate) {
        self.entries.insert(update.slab, update);
    }

    pub fn entry(&self, slab: SlabId) -> Option<SummaryUpdate> {
        self.entries.get(&slab).copied()
    }
}

impl SlabSummaryZone for InMemorySlabSummaryZone {
    fn tail_block_offset(&self, slab: SlabId) -> u32 {
        self.entries
            .get(&slab)
            .map(|entry| entry.tail_block_offset)
            .unwrap_or(0)
    }

    fn must_load_ref_counts(&self, slab: SlabId) -> bool {
        self.entries
            .get(&slab)
            .map(|entry| !entry.is_clean)
            .unwrap_or(true)
    }

    fn update_entry(&mut self, update: SummaryUpdate) -> Result<()> {
        self.entries.insert(update.slab, update);
        Ok(())
    }
}
