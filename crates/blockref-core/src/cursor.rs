//! A round-robin cursor over reference blocks that accelerates repeated
//! free-block searches by remembering where the last search left off.

use blockref_types::COUNTS_PER_BLOCK;

#[derive(Clone, Debug)]
pub struct SearchCursor {
    block: usize,
    index: usize,
    end_index: usize,
    first_block: usize,
    last_block: usize,
}

impl SearchCursor {
    pub fn new(block_count: u64, reference_block_count: usize) -> Self {
        let mut cursor = Self {
            block: 0,
            index: 0,
            end_index: 0,
            first_block: 0,
            last_block: reference_block_count.saturating_sub(1),
        };
        cursor.reset(block_count, reference_block_count);
        cursor
    }

    pub fn reset(&mut self, block_count: u64, reference_block_count: usize) {
        self.first_block = 0;
        self.last_block = reference_block_count.saturating_sub(1);
        self.block = self.first_block;
        self.index = 0;
        self.end_index = runt_aware_end(self.block, block_count);
    }

    pub fn block(&self) -> usize {
        self.block
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves to the start of the next reference block. Returns `false` when
    /// the cursor wraps back to the first block, signalling that a full
    /// sweep has completed with no room found.
    pub fn advance_block(&mut self, block_count: u64) -> bool {
        if self.block == self.last_block {
            self.block = self.first_block;
            self.index = 0;
            self.end_index = runt_aware_end(self.block, block_count);
            false
        } else {
            self.block += 1;
            self.index = 0;
            self.end_index = runt_aware_end(self.block, block_count);
            true
        }
    }

    /// Moves the cursor's index past a just-allocated counter at
    /// `global_index`, so the next search starts after it.
    pub fn advance_past(&mut self, global_index: usize, block_count: u64) {
        let block = global_index / COUNTS_PER_BLOCK;
        let next = global_index % COUNTS_PER_BLOCK + 1;
        if next >= self.end_index_for(block, block_count) {
            self.block = block;
            self.advance_block(block_count);
        } else {
            self.block = block;
            self.index = next;
            self.end_index = self.end_index_for(block, block_count);
        }
    }

    fn end_index_for(&self, block: usize, block_count: u64) -> usize {
        runt_aware_end(block, block_count)
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }
}

fn runt_aware_end(block: usize, block_count: u64) -> usize {
    let block_start = block as u64 * COUNTS_PER_BLOCK as u64;
    let remaining = block_count.saturating_sub(block_start);
    remaining.min(COUNTS_PER_BLOCK as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_points_at_first_block() {
        let cursor = SearchCursor::new(128, 2);
        assert_eq!(cursor.block(), 0);
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.end_index(), COUNTS_PER_BLOCK);
    }

    #[test]
    fn advance_block_wraps_after_last_block() {
        let mut cursor = SearchCursor::new(128, 2);
        assert!(cursor.advance_block(128));
        assert_eq!(cursor.block(), 1);
        assert!(!cursor.advance_block(128));
        assert_eq!(cursor.block(), 0);
    }

    #[test]
    fn runt_block_end_index_is_clamped() {
        let block_count = COUNTS_PER_BLOCK as u64 + 10;
        let cursor = SearchCursor::new(block_count, 2);
        assert_eq!(cursor.end_index(), COUNTS_PER_BLOCK);
        let mut cursor = cursor;
        cursor.advance_block(block_count);
        assert_eq!(cursor.end_index(), 10);
    }

    #[test]
    fn advance_past_moves_to_next_slot() {
        let mut cursor = SearchCursor::new(128, 2);
        cursor.advance_past(5, 128);
        assert_eq!(cursor.block(), 0);
        assert_eq!(cursor.index(), 6);
    }
}
