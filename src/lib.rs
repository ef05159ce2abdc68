#![forbid(unsafe_code)]

//! Public facade over the slab reference-count engine and its collaborators.

pub mod logging;

pub use blockref_collab::{
    InMemorySlabJournal, InMemorySlabSummaryZone, ReadOnlyNotifier, SlabJournal, SlabSummaryZone,
    SummaryUpdate,
};
pub use blockref_core::{
    pack_block, unpack_block, AdminStateCode, AllocationLock, BlockRefStats,
    BlockRefStatsSnapshot, EngineOptions, RefCounts, RefCountsSnapshot, ReferenceBlock,
    SearchCursor, SlabContext, TornWriteLogLevel, UnpackedBlock,
};
pub use blockref_descriptors::{Descriptor, DescriptorPool};
pub use blockref_types::{
    BlockRefError, JournalOperation, JournalPoint, Pbn, ReferenceStatus, Result, SlabId,
};
