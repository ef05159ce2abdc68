#![forbid(unsafe_code)]

//! The per-slab reference-count engine: tracks how many block-map entries
//! point at each physical block in a slab, allocates free blocks, and
//! manages the writeback of dirty reference-block state under slab-journal
//! lock coordination.
//!
//! The engine is driven entirely by its owning slab's single thread; see the
//! crate-level `README`-equivalent discussion of the concurrency model in
//! `refcounts.rs`.

mod allocation;
mod block;
mod cursor;
mod lifecycle;
mod options;
mod refcounts;
mod stats;

pub use allocation::AllocationLock;
pub use block::{pack_block, unpack_block, ReferenceBlock, UnpackedBlock};
pub use cursor::SearchCursor;
pub use lifecycle::{AdminStateCode, SlabContext};
pub use options::{EngineOptions, TornWriteLogLevel};
pub use refcounts::{RefCounts, RefCountsSnapshot};
pub use stats::{BlockRefStats, BlockRefStatsSnapshot};

pub use blockref_types::{
    BlockRefError, JournalOperation, JournalPoint, Pbn, ReferenceStatus, Result, SlabId,
};

#[cfg(test)]
mod tests {
    use super::*;
    use blockref_collab::{InMemorySlabJournal, InMemorySlabSummaryZone, ReadOnlyNotifier};
    use blockref_io::{BlockIo, MemoryIo};
    use blockref_types::{COUNTS_PER_BLOCK, PACKED_BLOCK_LEN};

    fn new_engine(block_count: u64) -> RefCounts {
        new_engine_with_origin(block_count, Pbn(1000))
    }

    fn new_engine_with_origin(block_count: u64, origin: Pbn) -> RefCounts {
        RefCounts::new(
            block_count,
            origin,
            SlabContext::new(SlabId(0)),
            Box::new(InMemorySlabJournal::new()),
            Box::new(InMemorySlabSummaryZone::new()),
            ReadOnlyNotifier::new(),
            EngineOptions::default(),
        )
    }

    #[test]
    fn scenario_allocate_from_empty_slab() {
        let mut engine = new_engine(128);
        let pbn = engine.allocate().unwrap();
        assert_eq!(pbn, Pbn(1000));
        assert_eq!(engine.free_blocks(), 127);
        assert_eq!(engine.get_available_references(Pbn(1000)).unwrap(), 253);
    }

    #[test]
    fn scenario_increment_after_allocate_marks_block_dirty_with_lock() {
        let mut engine = new_engine(128);
        let pbn = engine.allocate().unwrap();
        let changed = engine
            .adjust(
                JournalOperation::DataIncrement,
                pbn,
                Some(JournalPoint::new(7, 3)),
                None,
                true,
            )
            .unwrap();
        assert!(!changed);
        assert_eq!(engine.free_blocks(), 127);
        assert_eq!(engine.get_reference_status(pbn).unwrap(), ReferenceStatus::Single);
    }

    #[test]
    fn scenario_repeated_increments_release_journal_lock_without_moving_it() {
        let mut engine = new_engine(128);
        let pbn = engine.allocate().unwrap();
        engine
            .adjust(
                JournalOperation::DataIncrement,
                pbn,
                Some(JournalPoint::new(7, 3)),
                None,
                true,
            )
            .unwrap();
        engine
            .adjust(
                JournalOperation::DataIncrement,
                pbn,
                Some(JournalPoint::new(7, 4)),
                None,
                true,
            )
            .unwrap();
        engine
            .adjust(
                JournalOperation::DataIncrement,
                pbn,
                Some(JournalPoint::new(7, 5)),
                None,
                true,
            )
            .unwrap();
        assert_eq!(engine.get_available_references(pbn).unwrap(), 251);
    }

    #[test]
    fn scenario_increment_past_maximum_is_rejected() {
        let mut engine = new_engine(128);
        let pbn = engine.allocate().unwrap();
        engine
            .adjust(JournalOperation::DataIncrement, pbn, Some(JournalPoint::new(1, 0)), None, true)
            .unwrap();
        for entry in 1..254 {
            engine
                .adjust(
                    JournalOperation::DataIncrement,
                    pbn,
                    Some(JournalPoint::new(1, entry)),
                    None,
                    true,
                )
                .unwrap();
        }
        assert_eq!(engine.get_reference_status(pbn).unwrap(), ReferenceStatus::Shared);
        let before = engine.get_available_references(pbn).unwrap();
        assert_eq!(before, 0);
        let err = engine
            .adjust(
                JournalOperation::DataIncrement,
                pbn,
                Some(JournalPoint::new(1, 999)),
                None,
                true,
            )
            .unwrap_err();
        assert!(matches!(err, BlockRefError::RefCountInvalid { .. }));
    }

    #[test]
    fn scenario_write_completion_releases_lock_and_clears_writing_flag() {
        let mut engine = new_engine_with_origin(128, Pbn(0));
        let pbn = engine.allocate().unwrap();
        engine
            .adjust(
                JournalOperation::DataIncrement,
                pbn,
                Some(JournalPoint::new(7, 3)),
                None,
                true,
            )
            .unwrap();
        let io = MemoryIo::new((engine.reference_block_count() * PACKED_BLOCK_LEN) as usize);
        assert_eq!(engine.dirty_block_count(), 1);
        let wrote = engine.save_one(&io).unwrap();
        assert!(wrote);
        assert_eq!(engine.dirty_block_count(), 0);
    }

    #[test]
    fn provisional_allocation_reversal_restores_prior_state() {
        let mut engine = new_engine(128);
        let pbn = engine.allocate().unwrap();
        assert_eq!(engine.free_blocks(), 127);
        engine
            .adjust(JournalOperation::DataDecrement, pbn, None, None, true)
            .unwrap();
        assert_eq!(engine.free_blocks(), 128);
        assert_eq!(engine.get_reference_status(pbn).unwrap(), ReferenceStatus::Free);
    }

    #[test]
    fn shared_increment_decrement_round_trips_exactly() {
        let mut engine = new_engine(128);
        let pbn = engine.allocate().unwrap();
        engine
            .adjust(JournalOperation::DataIncrement, pbn, Some(JournalPoint::new(1, 0)), None, true)
            .unwrap();
        engine
            .adjust(JournalOperation::DataIncrement, pbn, Some(JournalPoint::new(1, 1)), None, true)
            .unwrap();
        let before = engine.get_available_references(pbn).unwrap();
        engine
            .adjust(JournalOperation::DataIncrement, pbn, Some(JournalPoint::new(1, 2)), None, true)
            .unwrap();
        engine
            .adjust(
                JournalOperation::DataDecrement,
                pbn,
                Some(JournalPoint::new(1, 3)),
                None,
                true,
            )
            .unwrap();
        assert_eq!(engine.get_available_references(pbn).unwrap(), before);
    }

    #[test]
    fn load_normalizes_provisional_counters_to_empty() {
        let reference_block_count = blockref_types::saved_reference_count_size(128) as usize;
        let io = MemoryIo::new(reference_block_count * PACKED_BLOCK_LEN);

        let mut counters = vec![0u8; COUNTS_PER_BLOCK];
        counters[5] = 3;
        counters[20] = 255;
        let packed = pack_block(0, &counters, JournalPoint::new(2, 0));
        io.write_at(0, &packed).unwrap();
        let clean_block = pack_block(1, &vec![0u8; COUNTS_PER_BLOCK], JournalPoint::new(2, 0));
        io.write_at(PACKED_BLOCK_LEN as u64, &clean_block).unwrap();

        let mut engine = new_engine_with_origin(128, Pbn(0));
        engine.load(&io).unwrap();

        assert_eq!(engine.get_reference_status(Pbn(5)).unwrap(), ReferenceStatus::Shared);
        assert_eq!(engine.get_reference_status(Pbn(20)).unwrap(), ReferenceStatus::Free);
        assert_eq!(engine.free_blocks(), 127);
    }

    #[test]
    fn mark_dirty_twice_keeps_single_queue_membership() {
        let mut engine = new_engine(128);
        engine.dirty_all_reference_blocks();
        let after_first = engine.dirty_block_count();
        engine.dirty_all_reference_blocks();
        assert_eq!(engine.dirty_block_count(), after_first);
    }
}
