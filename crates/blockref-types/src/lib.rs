#![forbid(unsafe_code)]

//! Shared identifiers, error type, and on-disk layouts for the slab
//! reference-count engine.

use std::fmt;

/// A physical block number: an index into the underlying block device.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Pbn(pub u64);

impl fmt::Display for Pbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The offset of a block within its slab (`pbn - slab.start`).
pub type SlabBlockNumber = u32;

/// Identifies a slab within the allocator.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SlabId(pub u16);

impl fmt::Display for SlabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BlockRefError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("corruption: {0}")]
    Corruption(&'static str),
    #[error("invalid argument: {0}")]
    Invalid(&'static str),
    #[error("slab {slab} is not open for this operation")]
    InvalidAdminState { slab: SlabId },
    #[error("invalid reference count transition in slab {slab} at offset {offset}: {reason}")]
    RefCountInvalid {
        slab: SlabId,
        offset: SlabBlockNumber,
        reason: &'static str,
    },
    #[error("pbn out of range for slab {slab}")]
    OutOfRange { slab: SlabId },
    #[error("slab {slab} has no free blocks")]
    NoSpace { slab: SlabId },
    #[error("internal impossibility: {0}")]
    Internal(&'static str),
}

impl Clone for BlockRefError {
    fn clone(&self) -> Self {
        match self {
            BlockRefError::Io(err) => BlockRefError::Io(std::io::Error::new(err.kind(), err.to_string())),
            BlockRefError::Corruption(msg) => BlockRefError::Corruption(msg),
            BlockRefError::Invalid(msg) => BlockRefError::Invalid(msg),
            BlockRefError::InvalidAdminState { slab } => BlockRefError::InvalidAdminState { slab: *slab },
            BlockRefError::RefCountInvalid {
                slab,
                offset,
                reason,
            } => BlockRefError::RefCountInvalid {
                slab: *slab,
                offset: *offset,
                reason,
            },
            BlockRefError::OutOfRange { slab } => BlockRefError::OutOfRange { slab: *slab },
            BlockRefError::NoSpace { slab } => BlockRefError::NoSpace { slab: *slab },
            BlockRefError::Internal(msg) => BlockRefError::Internal(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, BlockRefError>;

/// A single reference counter. `255` is the provisional sentinel, `254` is
/// the pinned maximum used for block-map pages.
pub type ReferenceCount = u8;

pub const EMPTY_REFERENCE_COUNT: ReferenceCount = 0;
pub const PROVISIONAL_REFERENCE_COUNT: ReferenceCount = 255;
pub const MAXIMUM_REFERENCE_COUNT: ReferenceCount = 254;

/// The classification of a counter's value, used to choose an update rule.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ReferenceStatus {
    Free,
    Single,
    Provisional,
    Shared,
}

pub fn reference_count_to_status(count: ReferenceCount) -> ReferenceStatus {
    match count {
        EMPTY_REFERENCE_COUNT => ReferenceStatus::Free,
        1 => ReferenceStatus::Single,
        PROVISIONAL_REFERENCE_COUNT => ReferenceStatus::Provisional,
        _ => ReferenceStatus::Shared,
    }
}

/// `MAXIMUM_REFERENCE_COUNT - count`, with `PROVISIONAL` treated as a single
/// reference since it stands in for a not-yet-journalled increment.
pub fn available_references(count: ReferenceCount) -> u8 {
    if count == PROVISIONAL_REFERENCE_COUNT {
        MAXIMUM_REFERENCE_COUNT - 1
    } else {
        MAXIMUM_REFERENCE_COUNT - count
    }
}

/// The kind of update the caller wants applied to a reference counter.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum JournalOperation {
    DataIncrement,
    DataDecrement,
    BlockMapIncrement,
}

/// A totally-ordered position within a slab journal's entry stream.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct JournalPoint {
    pub sequence_number: u64,
    pub entry_count: u16,
}

impl JournalPoint {
    pub const INVALID: JournalPoint = JournalPoint {
        sequence_number: 0,
        entry_count: 0,
    };

    pub fn new(sequence_number: u64, entry_count: u16) -> Self {
        Self {
            sequence_number,
            entry_count,
        }
    }

    /// A journal point is valid as long as it has a nonzero sequence number;
    /// `(0, 0)` is the sentinel used for "no journal entry" during rebuild.
    pub fn is_valid(&self) -> bool {
        self.sequence_number > 0
    }
}

pub fn before_journal_point(a: &JournalPoint, b: &JournalPoint) -> bool {
    (a.sequence_number, a.entry_count) < (b.sequence_number, b.entry_count)
}

pub fn are_equivalent_journal_points(a: &JournalPoint, b: &JournalPoint) -> bool {
    a.sequence_number == b.sequence_number && a.entry_count == b.entry_count
}

/// Byte layout of a packed journal point: `sequence:u64, entry:u16, _pad:u16`.
pub const PACKED_JOURNAL_POINT_LEN: usize = 12;

pub fn pack_journal_point(point: &JournalPoint) -> [u8; PACKED_JOURNAL_POINT_LEN] {
    let mut buf = [0u8; PACKED_JOURNAL_POINT_LEN];
    buf[0..8].copy_from_slice(&point.sequence_number.to_le_bytes());
    buf[8..10].copy_from_slice(&point.entry_count.to_le_bytes());
    buf
}

pub fn unpack_journal_point(buf: &[u8]) -> Result<JournalPoint> {
    if buf.len() < PACKED_JOURNAL_POINT_LEN {
        return Err(BlockRefError::Corruption("journal point truncated"));
    }
    let sequence_number = u64::from_le_bytes(buf[0..8].try_into().unwrap());
    let entry_count = u16::from_le_bytes(buf[8..10].try_into().unwrap());
    Ok(JournalPoint {
        sequence_number,
        entry_count,
    })
}

/// On-disk layout constants for reference blocks.
///
/// Chosen so that `COUNTS_PER_BLOCK` matches the example sizes used in the
/// engine's own test scenarios (64 counters per block).
pub const COUNTS_PER_SECTOR: usize = 8;
pub const SECTORS_PER_BLOCK: usize = 8;
pub const COUNTS_PER_BLOCK: usize = COUNTS_PER_SECTOR * SECTORS_PER_BLOCK;
pub const PACKED_SECTOR_LEN: usize = PACKED_JOURNAL_POINT_LEN + COUNTS_PER_SECTOR;
/// Length of the packed sector grid, not counting the whole-block checksum
/// trailer.
pub const PACKED_BLOCK_BODY_LEN: usize = PACKED_SECTOR_LEN * SECTORS_PER_BLOCK;
/// Trailing CRC32 guarding the packed sector grid against corruption and
/// misplaced blocks.
pub const PACKED_BLOCK_CHECKSUM_LEN: usize = 4;
pub const PACKED_BLOCK_LEN: usize = PACKED_BLOCK_BODY_LEN + PACKED_BLOCK_CHECKSUM_LEN;

/// Number of full-sized reference blocks needed to store `block_count`
/// counters (the last block may be a runt).
pub fn saved_reference_count_size(block_count: u64) -> u64 {
    (block_count + COUNTS_PER_BLOCK as u64 - 1) / COUNTS_PER_BLOCK as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_point_ordering() {
        let a = JournalPoint::new(1, 0);
        let b = JournalPoint::new(1, 1);
        let c = JournalPoint::new(2, 0);
        assert!(before_journal_point(&a, &b));
        assert!(before_journal_point(&b, &c));
        assert!(!before_journal_point(&b, &a));
        assert!(are_equivalent_journal_points(&a, &JournalPoint::new(1, 0)));
    }

    #[test]
    fn packed_journal_point_roundtrip() {
        let point = JournalPoint::new(42, 7);
        let packed = pack_journal_point(&point);
        let unpacked = unpack_journal_point(&packed).unwrap();
        assert_eq!(point, unpacked);
    }

    #[test]
    fn saved_reference_count_size_rounds_up() {
        assert_eq!(saved_reference_count_size(1), 1);
        assert_eq!(saved_reference_count_size(COUNTS_PER_BLOCK as u64), 1);
        assert_eq!(saved_reference_count_size(COUNTS_PER_BLOCK as u64 + 1), 2);
    }

    #[test]
    fn status_classification() {
        assert_eq!(
            reference_count_to_status(EMPTY_REFERENCE_COUNT),
            ReferenceStatus::Free
        );
        assert_eq!(reference_count_to_status(1), ReferenceStatus::Single);
        assert_eq!(
            reference_count_to_status(PROVISIONAL_REFERENCE_COUNT),
            ReferenceStatus::Provisional
        );
        assert_eq!(reference_count_to_status(2), ReferenceStatus::Shared);
        assert_eq!(reference_count_to_status(200), ReferenceStatus::Shared);
    }

    #[test]
    fn available_references_treats_provisional_as_single() {
        assert_eq!(available_references(0), MAXIMUM_REFERENCE_COUNT);
        assert_eq!(
            available_references(PROVISIONAL_REFERENCE_COUNT),
            MAXIMUM_REFERENCE_COUNT - 1
        );
        assert_eq!(available_references(1), MAXIMUM_REFERENCE_COUNT - 1);
    }
}
