//! Construction-time configuration for a [`crate::RefCounts`].

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TornWriteLogLevel {
    Warn,
    Error,
}

#[derive(Clone, Debug)]
pub struct EngineOptions {
    /// `save_several` writes `max(1, dirty_count / flush_divisor)` blocks.
    pub flush_divisor: u32,
    pub descriptor_pool_capacity: usize,
    pub torn_write_log_level: TornWriteLogLevel,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            flush_divisor: 4,
            descriptor_pool_capacity: 4,
            torn_write_log_level: TornWriteLogLevel::Warn,
        }
    }
}

impl EngineOptions {
    pub fn new(flush_divisor: u32, descriptor_pool_capacity: usize) -> Self {
        Self {
            flush_divisor,
            descriptor_pool_capacity,
            ..Self::default()
        }
    }
}
