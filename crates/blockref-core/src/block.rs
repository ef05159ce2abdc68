//! A single reference block: `COUNTS_PER_BLOCK` counters plus the writeback
//! bookkeeping and per-sector commit points needed to detect torn writes.

use blockref_checksum::{block_checksum, verify_block_checksum};
use blockref_types::{
    pack_journal_point, unpack_journal_point, JournalPoint, Result, COUNTS_PER_SECTOR,
    PACKED_BLOCK_BODY_LEN, PACKED_BLOCK_LEN, PACKED_JOURNAL_POINT_LEN, PACKED_SECTOR_LEN,
    SECTORS_PER_BLOCK,
};

#[derive(Clone, Debug)]
pub struct ReferenceBlock {
    pub allocated_count: u32,
    pub is_dirty: bool,
    pub is_writing: bool,
    pub slab_journal_lock: u64,
    pub slab_journal_lock_to_release: u64,
    pub commit_points: [JournalPoint; SECTORS_PER_BLOCK],
}

impl Default for ReferenceBlock {
    fn default() -> Self {
        Self {
            allocated_count: 0,
            is_dirty: false,
            is_writing: false,
            slab_journal_lock: 0,
            slab_journal_lock_to_release: 0,
            commit_points: [JournalPoint::default(); SECTORS_PER_BLOCK],
        }
    }
}

impl ReferenceBlock {
    pub fn is_clean(&self) -> bool {
        !self.is_dirty
    }

    /// The journal point this block's on-disk state actually reflects: the
    /// latest point seen across all of its sectors.
    pub fn effective_commit_point(&self) -> JournalPoint {
        self.commit_points
            .iter()
            .copied()
            .max_by_key(|point| (point.sequence_number, point.entry_count))
            .unwrap_or_default()
    }

    pub fn stamp_commit_point(&mut self, point: JournalPoint) {
        self.commit_points = [point; SECTORS_PER_BLOCK];
    }
}

/// Serializes `counters` (exactly `COUNTS_PER_BLOCK` bytes, short-padded with
/// zeros for a runt final block) into the packed on-disk layout, stamping
/// every sector with the same commit point and appending a CRC32 trailer
/// over the sector grid, salted with `block_index` so a block swapped with
/// its neighbor at load time is still caught.
pub fn pack_block(block_index: u64, counters: &[u8], commit_point: JournalPoint) -> [u8; PACKED_BLOCK_LEN] {
    let mut buf = [0u8; PACKED_BLOCK_LEN];
    let packed_point = pack_journal_point(&commit_point);
    for sector in 0..SECTORS_PER_BLOCK {
        let sector_offset = sector * PACKED_SECTOR_LEN;
        buf[sector_offset..sector_offset + PACKED_JOURNAL_POINT_LEN].copy_from_slice(&packed_point);
        let counts_offset = sector_offset + PACKED_JOURNAL_POINT_LEN;
        let src_offset = sector * COUNTS_PER_SECTOR;
        let src = &counters[src_offset..src_offset + COUNTS_PER_SECTOR];
        buf[counts_offset..counts_offset + COUNTS_PER_SECTOR].copy_from_slice(src);
    }
    let checksum = block_checksum(block_index, 0, &buf[..PACKED_BLOCK_BODY_LEN]);
    buf[PACKED_BLOCK_BODY_LEN..].copy_from_slice(&checksum.to_le_bytes());
    buf
}

#[derive(Debug)]
pub struct UnpackedBlock {
    pub counters: Vec<u8>,
    pub sector_points: [JournalPoint; SECTORS_PER_BLOCK],
    pub torn: bool,
}

/// Parses a packed block, verifying its checksum trailer and reporting
/// whether its sectors' commit points disagree (a torn write). Provisional
/// counters are never corrected here; the loader is responsible for
/// normalizing them back to `EMPTY`.
pub fn unpack_block(block_index: u64, buf: &[u8]) -> Result<UnpackedBlock> {
    if buf.len() < PACKED_BLOCK_LEN {
        return Err(blockref_types::BlockRefError::Corruption(
            "reference block truncated",
        ));
    }
    let checksum = u32::from_le_bytes(
        buf[PACKED_BLOCK_BODY_LEN..PACKED_BLOCK_LEN].try_into().unwrap(),
    );
    if !verify_block_checksum(block_index, 0, &buf[..PACKED_BLOCK_BODY_LEN], checksum) {
        return Err(blockref_types::BlockRefError::Corruption(
            "reference block checksum mismatch",
        ));
    }
    let mut counters = Vec::with_capacity(COUNTS_PER_SECTOR * SECTORS_PER_BLOCK);
    let mut sector_points = [JournalPoint::default(); SECTORS_PER_BLOCK];
    for sector in 0..SECTORS_PER_BLOCK {
        let sector_offset = sector * PACKED_SECTOR_LEN;
        let point = unpack_journal_point(&buf[sector_offset..sector_offset + PACKED_JOURNAL_POINT_LEN])?;
        sector_points[sector] = point;
        let counts_offset = sector_offset + PACKED_JOURNAL_POINT_LEN;
        counters.extend_from_slice(&buf[counts_offset..counts_offset + COUNTS_PER_SECTOR]);
    }
    let first = sector_points[0];
    let torn = sector_points[1..]
        .iter()
        .any(|point| *point != first);
    Ok(UnpackedBlock {
        counters,
        sector_points,
        torn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockref_types::COUNTS_PER_BLOCK;

    #[test]
    fn pack_unpack_round_trip_preserves_counters_and_points() {
        let mut counters = vec![0u8; COUNTS_PER_BLOCK];
        counters[0] = 3;
        counters[10] = 254;
        let point = JournalPoint::new(7, 2);
        let packed = pack_block(3, &counters, point);
        let unpacked = unpack_block(3, &packed).unwrap();
        assert_eq!(unpacked.counters, counters);
        assert!(!unpacked.torn);
        assert!(unpacked.sector_points.iter().all(|p| *p == point));
    }

    #[test]
    fn torn_write_detected_when_sectors_disagree() {
        let counters = vec![0u8; COUNTS_PER_BLOCK];
        let mut packed = pack_block(3, &counters, JournalPoint::new(5, 0));
        let other = pack_journal_point(&JournalPoint::new(6, 0));
        let sector_offset = PACKED_SECTOR_LEN;
        packed[sector_offset..sector_offset + PACKED_JOURNAL_POINT_LEN].copy_from_slice(&other);
        // Stamping a divergent sector point without recomputing the
        // checksum would make this indistinguishable from corruption; redo
        // it here the same way a torn write actually leaves it (the
        // checksum covers the raw bytes VDO wrote, torn sectors and all).
        let recomputed = blockref_checksum::block_checksum(
            3,
            0,
            &packed[..blockref_types::PACKED_BLOCK_BODY_LEN],
        );
        let body_len = blockref_types::PACKED_BLOCK_BODY_LEN;
        packed[body_len..].copy_from_slice(&recomputed.to_le_bytes());
        let unpacked = unpack_block(3, &packed).unwrap();
        assert!(unpacked.torn);
    }

    #[test]
    fn checksum_mismatch_is_reported_as_corruption() {
        let counters = vec![0u8; COUNTS_PER_BLOCK];
        let mut packed = pack_block(3, &counters, JournalPoint::new(5, 0));
        let last = packed.len() - 1;
        packed[last] ^= 0xff;
        let err = unpack_block(3, &packed).unwrap_err();
        assert!(matches!(err, blockref_types::BlockRefError::Corruption(_)));
    }

    #[test]
    fn checksum_is_salted_by_block_index() {
        let counters = vec![0u8; COUNTS_PER_BLOCK];
        let packed = pack_block(3, &counters, JournalPoint::new(5, 0));
        assert!(unpack_block(4, &packed).is_err());
    }

    #[test]
    fn effective_commit_point_is_the_maximum_sector_point() {
        let mut block = ReferenceBlock::default();
        block.commit_points[0] = JournalPoint::new(3, 0);
        block.commit_points[1] = JournalPoint::new(5, 1);
        assert_eq!(block.effective_commit_point(), JournalPoint::new(5, 1));
    }
}
