#![forbid(unsafe_code)]

//! Checksums for packed reference-block sectors and full blocks.

/// Computes the checksum stamped into a reference-block sector or the
/// whole-block trailer, salted with the block's own pbn so that a sector
/// silently relocated to the wrong offset is still detected.
pub fn block_checksum(pbn: u64, salt: u32, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&pbn.to_le_bytes());
    hasher.update(&salt.to_le_bytes());
    hasher.update(data);
    hasher.finalize()
}

pub fn verify_block_checksum(pbn: u64, salt: u32, data: &[u8], expected: u32) -> bool {
    block_checksum(pbn, salt, data) == expected
}
