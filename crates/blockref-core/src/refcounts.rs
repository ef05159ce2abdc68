//! The reference-count engine itself: owns the counter array and the
//! reference-block vector for a single slab, and implements every operation
//! in this crate's component design (C1-C9).

use std::collections::VecDeque;

use blockref_collab::{ReadOnlyNotifier, SlabJournal, SlabSummaryZone, SummaryUpdate};
use blockref_descriptors::DescriptorPool;
use blockref_io::BlockIo;
use blockref_types::{
    are_equivalent_journal_points, available_references as available_references_for,
    before_journal_point, reference_count_to_status, BlockRefError, JournalOperation,
    JournalPoint, Pbn, Result, SlabBlockNumber, COUNTS_PER_BLOCK, EMPTY_REFERENCE_COUNT,
    MAXIMUM_REFERENCE_COUNT, PACKED_BLOCK_LEN, PROVISIONAL_REFERENCE_COUNT,
};

use crate::allocation::AllocationLock;
use crate::block::{pack_block, unpack_block, ReferenceBlock};
use crate::cursor::SearchCursor;
use crate::lifecycle::{AdminStateCode, SlabContext};
use crate::options::EngineOptions;
use crate::stats::BlockRefStats;

/// A plain snapshot of a `RefCounts` suitable for logging or test assertions
/// (the `dump_ref_counts` operation).
#[derive(Clone, Debug)]
pub struct RefCountsSnapshot {
    pub slab_number: blockref_types::SlabId,
    pub block_count: u64,
    pub free_blocks: u64,
    pub active_count: u32,
    pub dirty_block_count: usize,
    pub updating_slab_summary: bool,
    pub slab_journal_point: JournalPoint,
}

pub struct RefCounts {
    pub slab: SlabContext,
    origin_pbn: Pbn,
    block_count: u64,
    counters: Vec<u8>,
    blocks: Vec<ReferenceBlock>,
    cursor: SearchCursor,
    free_blocks: u64,
    dirty_queue: VecDeque<usize>,
    active_count: u32,
    updating_slab_summary: bool,
    slab_journal_point: JournalPoint,
    read_only: ReadOnlyNotifier,
    stats: BlockRefStats,
    journal: Box<dyn SlabJournal>,
    summary: Box<dyn SlabSummaryZone>,
    descriptors: DescriptorPool,
    options: EngineOptions,
}

const COUNTER_PADDING: usize = 2 * blockref_types::COUNTS_PER_SECTOR;

impl RefCounts {
    pub fn new(
        block_count: u64,
        origin_pbn: Pbn,
        slab: SlabContext,
        journal: Box<dyn SlabJournal>,
        summary: Box<dyn SlabSummaryZone>,
        read_only: ReadOnlyNotifier,
        options: EngineOptions,
    ) -> Self {
        let reference_block_count =
            blockref_types::saved_reference_count_size(block_count) as usize;
        let descriptors =
            DescriptorPool::new(options.descriptor_pool_capacity, PACKED_BLOCK_LEN);
        Self {
            slab,
            origin_pbn,
            block_count,
            counters: vec![EMPTY_REFERENCE_COUNT; block_count as usize + COUNTER_PADDING],
            blocks: (0..reference_block_count)
                .map(|_| ReferenceBlock::default())
                .collect(),
            cursor: SearchCursor::new(block_count, reference_block_count),
            free_blocks: block_count,
            dirty_queue: VecDeque::new(),
            active_count: 0,
            updating_slab_summary: false,
            slab_journal_point: JournalPoint::default(),
            read_only,
            stats: BlockRefStats::new(),
            journal,
            summary,
            descriptors,
            options,
        }
    }

    pub fn stats(&self) -> &BlockRefStats {
        &self.stats
    }

    pub fn free_blocks(&self) -> u64 {
        self.free_blocks
    }

    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    pub fn reference_block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn dirty_block_count(&self) -> usize {
        self.dirty_queue.len()
    }

    pub fn slab_journal_point(&self) -> JournalPoint {
        self.slab_journal_point
    }

    fn slab_block_number(&self, pbn: Pbn) -> Result<SlabBlockNumber> {
        if pbn.0 < self.origin_pbn.0 {
            return Err(BlockRefError::OutOfRange {
                slab: self.slab.slab_number,
            });
        }
        let offset = pbn.0 - self.origin_pbn.0;
        if offset >= self.block_count {
            return Err(BlockRefError::OutOfRange {
                slab: self.slab.slab_number,
            });
        }
        Ok(offset as SlabBlockNumber)
    }

    /// Byte offset of a reference block within this slab's metadata region.
    /// Keyed purely by block index: the data pbn numbering (`origin_pbn`)
    /// addresses a different region of the volume and has no bearing on
    /// where a slab's own reference blocks live on the metadata device.
    fn ref_block_byte_offset(&self, block_index: usize) -> u64 {
        (block_index * PACKED_BLOCK_LEN) as u64
    }

    // ---- C1: counter array & status queries --------------------------------

    pub fn get_reference_status(&self, pbn: Pbn) -> Result<blockref_types::ReferenceStatus> {
        let sbn = self.slab_block_number(pbn)?;
        Ok(reference_count_to_status(self.counters[sbn as usize]))
    }

    pub fn get_available_references(&self, pbn: Pbn) -> Result<u8> {
        let sbn = self.slab_block_number(pbn)?;
        Ok(available_references_for(self.counters[sbn as usize]))
    }

    pub fn get_unreferenced_block_count(&self) -> u64 {
        self.free_blocks
    }

    pub fn count_unreferenced_blocks(&self, start: Pbn, end: Pbn) -> Result<u64> {
        let start_sbn = self.slab_block_number(start)? as usize;
        let end_sbn = if end.0 == self.origin_pbn.0 + self.block_count {
            self.block_count as usize
        } else {
            self.slab_block_number(end)? as usize
        };
        Ok(self.counters[start_sbn..end_sbn]
            .iter()
            .filter(|&&c| c == EMPTY_REFERENCE_COUNT)
            .count() as u64)
    }

    pub fn dump_ref_counts(&self) -> RefCountsSnapshot {
        let snapshot = RefCountsSnapshot {
            slab_number: self.slab.slab_number,
            block_count: self.block_count,
            free_blocks: self.free_blocks,
            active_count: self.active_count,
            dirty_block_count: self.dirty_queue.len(),
            updating_slab_summary: self.updating_slab_summary,
            slab_journal_point: self.slab_journal_point,
        };
        tracing::info!(
            slab = snapshot.slab_number.0,
            free_blocks = snapshot.free_blocks,
            active_count = snapshot.active_count,
            dirty = snapshot.dirty_block_count,
            "ref-counts snapshot"
        );
        snapshot
    }

    // ---- C4: update core -----------------------------------------------

    /// Applies `operation` to the counter backing `pbn`. Returns whether the
    /// slab's free/non-free classification of that block changed.
    pub fn adjust(
        &mut self,
        operation: JournalOperation,
        pbn: Pbn,
        journal_point: Option<JournalPoint>,
        lock: Option<&AllocationLock>,
        normal_operation: bool,
    ) -> Result<bool> {
        let sbn = self.slab_block_number(pbn)? as usize;
        let block_index = sbn / COUNTS_PER_BLOCK;
        let status = reference_count_to_status(self.counters[sbn]);

        let (new_value, free_status_changed, provisional_decrement) = match operation {
            JournalOperation::DataIncrement => {
                self.apply_data_increment(sbn as SlabBlockNumber, status, self.counters[sbn], lock)?
            }
            JournalOperation::DataDecrement => {
                self.apply_data_decrement(sbn as SlabBlockNumber, status, self.counters[sbn], lock)?
            }
            JournalOperation::BlockMapIncrement => self.apply_block_map_increment(
                sbn as SlabBlockNumber,
                status,
                self.counters[sbn],
                normal_operation,
                lock,
            )?,
        };

        self.counters[sbn] = new_value;
        let block = &mut self.blocks[block_index];
        if free_status_changed {
            if new_value == EMPTY_REFERENCE_COUNT {
                block.allocated_count -= 1;
                self.free_blocks += 1;
            } else {
                block.allocated_count += 1;
                self.free_blocks -= 1;
            }
        }

        // A provisional decrement reverses a reservation that was never
        // journalled, so it short-circuits here: no journal point, no lock,
        // no dirty-queue entry.
        if provisional_decrement {
            return Ok(free_status_changed);
        }

        if let Some(point) = journal_point {
            if point.is_valid() {
                self.slab_journal_point = point;
            }
        }

        let sequence = journal_point.map(|p| p.sequence_number).unwrap_or(0);

        // Every journal entry takes a lock on its sequence at creation time;
        // that bookkeeping normally lives in the slab journal itself, but
        // nothing upstream of this call models it, so this entry's lock is
        // taken here and immediately released below if it turns out to be
        // redundant with a lock the reference block already holds.
        if sequence > 0 {
            if let Err(err) = self.journal.adjust_block_reference(sequence, 1) {
                self.read_only.enter_read_only_mode(err.clone());
                return Err(err);
            }
        }

        let block = &mut self.blocks[block_index];
        if block.is_dirty && block.slab_journal_lock > 0 {
            if sequence > 0 {
                if let Err(err) = self.journal.adjust_block_reference(sequence, -1) {
                    self.read_only.enter_read_only_mode(err.clone());
                    return Err(err);
                }
            }
        } else {
            block.slab_journal_lock = sequence;
            self.mark_dirty(block_index);
        }

        Ok(free_status_changed)
    }

    fn apply_data_increment(
        &self,
        offset: SlabBlockNumber,
        status: blockref_types::ReferenceStatus,
        current: u8,
        lock: Option<&AllocationLock>,
    ) -> Result<(u8, bool, bool)> {
        use blockref_types::ReferenceStatus::*;
        let result = match status {
            Free => (1u8, true),
            Provisional => (1u8, false),
            Single | Shared if current < MAXIMUM_REFERENCE_COUNT => (current + 1, false),
            _ => {
                return Err(BlockRefError::RefCountInvalid {
                    slab: self.slab.slab_number,
                    offset,
                    reason: "increment of a block already at the maximum reference count",
                })
            }
        };
        if let Some(lock) = lock {
            lock.unassign_provisional_reference();
        }
        Ok((result.0, result.1, false))
    }

    fn apply_data_decrement(
        &self,
        offset: SlabBlockNumber,
        status: blockref_types::ReferenceStatus,
        current: u8,
        lock: Option<&AllocationLock>,
    ) -> Result<(u8, bool, bool)> {
        use blockref_types::ReferenceStatus::*;
        match status {
            Free => Err(BlockRefError::RefCountInvalid {
                slab: self.slab.slab_number,
                offset,
                reason: "decrement of an already-free block",
            }),
            Provisional | Single => {
                let provisional_decrement = status == Provisional;
                if let Some(lock) = lock {
                    lock.assign_provisional_reference();
                    Ok((PROVISIONAL_REFERENCE_COUNT, false, provisional_decrement))
                } else {
                    Ok((EMPTY_REFERENCE_COUNT, true, provisional_decrement))
                }
            }
            Shared => Ok((current - 1, false, false)),
        }
    }

    fn apply_block_map_increment(
        &self,
        offset: SlabBlockNumber,
        status: blockref_types::ReferenceStatus,
        _current: u8,
        normal_operation: bool,
        lock: Option<&AllocationLock>,
    ) -> Result<(u8, bool, bool)> {
        use blockref_types::ReferenceStatus::*;
        match (status, normal_operation) {
            (Free, true) => Err(BlockRefError::RefCountInvalid {
                slab: self.slab.slab_number,
                offset,
                reason: "block map increment of an unallocated block",
            }),
            (Free, false) => Ok((MAXIMUM_REFERENCE_COUNT, true, false)),
            (Provisional, true) => {
                if let Some(lock) = lock {
                    lock.unassign_provisional_reference();
                }
                Ok((MAXIMUM_REFERENCE_COUNT, false, false))
            }
            (Provisional, false) => Err(BlockRefError::RefCountInvalid {
                slab: self.slab.slab_number,
                offset,
                reason: "provisional reference encountered during replay",
            }),
            _ => Err(BlockRefError::RefCountInvalid {
                slab: self.slab.slab_number,
                offset,
                reason: "re-increment of an already-referenced block map page",
            }),
        }
    }

    // ---- C2: dirty queue -------------------------------------------------

    fn mark_dirty(&mut self, block_index: usize) {
        let block = &mut self.blocks[block_index];
        if block.is_writing {
            block.is_dirty = true;
            return;
        }
        if block.is_dirty {
            return;
        }
        block.is_dirty = true;
        self.dirty_queue.push_back(block_index);
    }

    pub fn dirty_all_reference_blocks(&mut self) {
        for index in 0..self.blocks.len() {
            self.mark_dirty(index);
        }
    }

    /// Locks every currently-dirty block against the engine's latest
    /// observed journal point, for blocks that were dirtied without ever
    /// going through `adjust` (e.g. a forced `dirty_all_reference_blocks`).
    pub fn acquire_dirty_block_locks(&mut self) -> Result<()> {
        let sequence = self.slab_journal_point.sequence_number;
        if sequence == 0 {
            return Ok(());
        }
        for index in 0..self.blocks.len() {
            let block = &mut self.blocks[index];
            if block.is_dirty && block.slab_journal_lock == 0 {
                block.slab_journal_lock = sequence;
                self.journal.adjust_block_reference(sequence, 1)?;
            }
        }
        Ok(())
    }

    pub fn reset_reference_counts(&mut self) {
        for counter in self.counters.iter_mut() {
            *counter = EMPTY_REFERENCE_COUNT;
        }
        for block in self.blocks.iter_mut() {
            *block = ReferenceBlock::default();
        }
        self.dirty_queue.clear();
        self.free_blocks = self.block_count;
        self.active_count = 0;
        self.updating_slab_summary = false;
        self.slab_journal_point = JournalPoint::default();
    }

    // ---- C5: allocation ----------------------------------------------------

    pub fn allocate(&mut self) -> Result<Pbn> {
        if !self.slab.is_open() {
            return Err(BlockRefError::InvalidAdminState {
                slab: self.slab.slab_number,
            });
        }
        match self.find_free_index() {
            Some(index) => {
                self.counters[index] = PROVISIONAL_REFERENCE_COUNT;
                let block_index = index / COUNTS_PER_BLOCK;
                self.blocks[block_index].allocated_count += 1;
                self.free_blocks -= 1;
                self.cursor.advance_past(index, self.block_count);
                Ok(Pbn(self.origin_pbn.0 + index as u64))
            }
            None => Err(BlockRefError::NoSpace {
                slab: self.slab.slab_number,
            }),
        }
    }

    pub fn provisionally_reference(&mut self, pbn: Pbn, lock: &AllocationLock) -> Result<()> {
        let sbn = self.slab_block_number(pbn)? as usize;
        if self.counters[sbn] == EMPTY_REFERENCE_COUNT {
            self.counters[sbn] = PROVISIONAL_REFERENCE_COUNT;
            lock.assign_provisional_reference();
            let block_index = sbn / COUNTS_PER_BLOCK;
            self.blocks[block_index].allocated_count += 1;
            self.free_blocks -= 1;
        }
        Ok(())
    }

    fn find_free_index(&mut self) -> Option<usize> {
        let reference_block_count = self.blocks.len();
        for _ in 0..reference_block_count {
            let block = self.cursor.block();
            if self.blocks[block].allocated_count as usize == self.cursor.end_index() {
                if !self.cursor.advance_block(self.block_count) {
                    break;
                }
                continue;
            }
            let base = block * COUNTS_PER_BLOCK;
            for offset in self.cursor.index()..self.cursor.end_index() {
                if self.counters[base + offset] == EMPTY_REFERENCE_COUNT {
                    return Some(base + offset);
                }
            }
            if !self.cursor.advance_block(self.block_count) {
                break;
            }
        }
        None
    }

    // ---- C6: writeback -----------------------------------------------------

    fn pack_for_write(&self, block_index: usize) -> Vec<u8> {
        let base = block_index * COUNTS_PER_BLOCK;
        let end = (base + COUNTS_PER_BLOCK).min(self.counters.len());
        let mut counters = self.counters[base..end].to_vec();
        counters.resize(COUNTS_PER_BLOCK, EMPTY_REFERENCE_COUNT);
        pack_block(block_index as u64, &counters, self.slab_journal_point).to_vec()
    }

    /// Writes the single oldest dirty block, if any. Descriptor acquisition,
    /// the write itself, and completion are modeled synchronously since this
    /// engine has no async runtime underneath it (see crate docs).
    pub fn save_one(&mut self, io: &dyn BlockIo) -> Result<bool> {
        let Some(block_index) = self.dirty_queue.pop_front() else {
            return Ok(false);
        };
        let payload = self.pack_for_write(block_index);
        let lock_to_release = self.blocks[block_index].slab_journal_lock;
        {
            let block = &mut self.blocks[block_index];
            block.is_dirty = false;
            block.is_writing = true;
            block.slab_journal_lock_to_release = lock_to_release;
            block.stamp_commit_point(self.slab_journal_point);
        }
        self.active_count += 1;

        let write_result = self.write_descriptor(block_index, &payload, io);
        self.complete_write(block_index, lock_to_release, write_result)?;
        Ok(true)
    }

    fn write_descriptor(&mut self, block_index: usize, payload: &[u8], io: &dyn BlockIo) -> Result<()> {
        use std::sync::{Arc, Mutex};

        let acquired: Arc<Mutex<Option<blockref_descriptors::Descriptor>>> =
            Arc::new(Mutex::new(None));
        let slot = acquired.clone();
        self.descriptors.acquire(move |descriptor| {
            *slot.lock().unwrap() = Some(descriptor);
        });
        let mut descriptor = acquired.lock().unwrap().take().ok_or_else(|| {
            BlockRefError::Internal("descriptor pool exhausted under synchronous writeback")
        })?;
        descriptor.buffer[..payload.len()].copy_from_slice(payload);

        let offset = self.ref_block_byte_offset(block_index);
        let result = io.write_at(offset, &descriptor.buffer);
        self.descriptors.release(descriptor);
        result
    }

    fn complete_write(
        &mut self,
        block_index: usize,
        lock_to_release: u64,
        write_result: Result<()>,
    ) -> Result<()> {
        self.active_count -= 1;
        self.blocks[block_index].is_writing = false;

        if let Err(err) = write_result {
            self.read_only.enter_read_only_mode(err.clone());
            return Err(err);
        }

        if lock_to_release > 0 {
            self.journal.adjust_block_reference(lock_to_release, -1)?;
        }
        self.stats.record_block_written();

        if self.read_only.is_read_only() {
            return Ok(());
        }

        if self.blocks[block_index].is_dirty {
            self.dirty_queue.push_back(block_index);
        }

        self.maybe_publish_clean()?;
        Ok(())
    }

    pub fn save_several(&mut self, io: &dyn BlockIo) -> Result<usize> {
        let batch = (self.dirty_queue.len() / self.options.flush_divisor.max(1) as usize).max(1);
        let mut written = 0;
        for _ in 0..batch {
            if !self.save_one(io)? {
                break;
            }
            written += 1;
        }
        Ok(written)
    }

    pub fn save_all(&mut self, io: &dyn BlockIo) -> Result<usize> {
        let mut written = 0;
        while self.save_one(io)? {
            written += 1;
        }
        Ok(written)
    }

    // ---- C8: slab-summary publication ---------------------------------

    fn maybe_publish_clean(&mut self) -> Result<()> {
        if self.active_count == 0 && self.dirty_queue.is_empty() && !self.updating_slab_summary {
            self.updating_slab_summary = true;
            let update = SummaryUpdate {
                slab: self.slab.slab_number,
                tail_block_offset: self.slab_journal_point.sequence_number as u32,
                is_clean: true,
                load_ref_counts: true,
                free_block_count: self.free_blocks as u32,
            };
            match self.summary.update_entry(update) {
                Ok(()) => {
                    self.updating_slab_summary = false;
                    self.stats.record_summary_update();
                }
                Err(err) => {
                    self.updating_slab_summary = false;
                    if !self.read_only.is_read_only() {
                        self.read_only.enter_read_only_mode(err.clone());
                    }
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    // ---- C7: load / replay / rebuild --------------------------------------

    pub fn load(&mut self, io: &dyn BlockIo) -> Result<()> {
        self.free_blocks = self.block_count;
        self.active_count = self.blocks.len() as u32;
        let mut highest_point = JournalPoint::default();

        for block_index in 0..self.blocks.len() {
            let offset = self.ref_block_byte_offset(block_index);
            let mut buf = vec![0u8; PACKED_BLOCK_LEN];
            io.read_at(offset, &mut buf)?;
            self.stats.record_block_read();

            let unpacked = unpack_block(block_index as u64, &buf)?;
            if unpacked.torn {
                self.stats.record_torn_write_warning();
                tracing::warn!(
                    slab = self.slab.slab_number.0,
                    block = block_index,
                    "torn write detected while loading reference block"
                );
            }

            let base = block_index * COUNTS_PER_BLOCK;
            let block_block_count = self.block_count.saturating_sub(base as u64).min(COUNTS_PER_BLOCK as u64) as usize;
            let mut allocated_count = 0u32;
            for (offset_in_block, value) in unpacked.counters.iter().enumerate().take(block_block_count) {
                let normalized = if *value == PROVISIONAL_REFERENCE_COUNT {
                    EMPTY_REFERENCE_COUNT
                } else {
                    *value
                };
                if normalized != EMPTY_REFERENCE_COUNT {
                    allocated_count += 1;
                }
                self.counters[base + offset_in_block] = normalized;
            }

            let effective = unpacked
                .sector_points
                .iter()
                .copied()
                .max_by_key(|p| (p.sequence_number, p.entry_count))
                .unwrap_or_default();
            if before_journal_point(&highest_point, &effective) {
                highest_point = effective;
            }

            let block = &mut self.blocks[block_index];
            block.commit_points = unpacked.sector_points;
            block.allocated_count = allocated_count;
            block.is_dirty = false;
            block.is_writing = false;

            self.free_blocks -= allocated_count as u64;
            self.active_count -= 1;
        }

        self.slab_journal_point = highest_point;
        Ok(())
    }

    /// Applies a single replayed journal entry if its effect is not already
    /// reflected in the target block's on-disk state.
    pub fn replay_entry(
        &mut self,
        sbn: SlabBlockNumber,
        operation: JournalOperation,
        entry_point: JournalPoint,
    ) -> Result<()> {
        let block_index = sbn as usize / COUNTS_PER_BLOCK;
        let committed = self.blocks[block_index].effective_commit_point();
        let already_applied = are_equivalent_journal_points(&committed, &entry_point)
            || !before_journal_point(&committed, &entry_point);
        if already_applied {
            return Ok(());
        }
        let pbn = Pbn(self.origin_pbn.0 + sbn as u64);
        self.adjust(operation, pbn, Some(entry_point), None, false)?;
        self.mark_dirty(block_index);
        Ok(())
    }

    /// Applies a rebuild-time block-map increment with no journal point.
    pub fn rebuild_reference_count(&mut self, sbn: SlabBlockNumber) -> Result<()> {
        let pbn = Pbn(self.origin_pbn.0 + sbn as u64);
        self.adjust(JournalOperation::BlockMapIncrement, pbn, None, None, false)?;
        Ok(())
    }

    pub fn finish_rebuild(&mut self) -> Result<()> {
        for block in self.blocks.iter_mut() {
            block.slab_journal_lock = 1;
            if !block.is_writing {
                block.is_dirty = true;
            }
        }
        self.dirty_queue = (0..self.blocks.len()).collect();
        self.journal.adjust_block_reference(1, self.blocks.len() as i32)?;
        Ok(())
    }

    // ---- C9: drain / lifecycle -------------------------------------------

    pub fn are_active(&self) -> bool {
        if self.active_count > 0 || self.updating_slab_summary {
            return true;
        }
        if matches!(
            self.slab.state,
            AdminStateCode::Suspending | AdminStateCode::Recovering
        ) {
            return false;
        }
        !self.dirty_queue.is_empty()
    }

    pub fn drain(&mut self, io: &dyn BlockIo) -> Result<()> {
        match self.slab.state {
            AdminStateCode::Scrubbing => {
                if self.summary.must_load_ref_counts(self.slab.slab_number) {
                    self.load(io)?;
                }
            }
            AdminStateCode::SaveForScrubbing => {
                if !self.summary.must_load_ref_counts(self.slab.slab_number) {
                    self.dirty_all_reference_blocks();
                    self.save_all(io)?;
                }
            }
            AdminStateCode::Rebuilding => {
                if self.slab.should_save_fully_built() {
                    self.dirty_all_reference_blocks();
                    self.save_all(io)?;
                }
            }
            AdminStateCode::Saving => {
                if !self.slab.is_unrecovered() {
                    self.save_all(io)?;
                }
            }
            AdminStateCode::Recovering | AdminStateCode::Suspending => {}
            AdminStateCode::Normal => {}
        }
        Ok(())
    }
}
