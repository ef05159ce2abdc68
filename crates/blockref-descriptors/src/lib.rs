#![forbid(unsafe_code)]

//! A fixed-size pool of write buffers ("descriptors") used to launch
//! metadata writes without allocating on the hot path. Modeled on the
//! original engine's vio pool: a bounded set of reusable buffers handed out
//! to callers and returned when the write they back completes, with callers
//! queued in FIFO order when the pool is exhausted.

use std::sync::atomic::{AtomicU64, Ordering};

use blockref_concurrency::WaitQueue;

/// A buffer on loan from a [`DescriptorPool`]. Dropping it without calling
/// [`DescriptorPool::release`] leaks it out of the pool permanently, so
/// callers must always route it back through `release`.
pub struct Descriptor {
    pub index: usize,
    pub buffer: Vec<u8>,
}

type Waiter = Box<dyn FnOnce(Descriptor) + Send>;

pub struct DescriptorPool {
    buffer_len: usize,
    free: Vec<Descriptor>,
    waiters: WaitQueue<Waiter>,
    outstanding: usize,
    outage_count: AtomicU64,
}

impl DescriptorPool {
    pub fn new(pool_size: usize, buffer_len: usize) -> Self {
        let free = (0..pool_size)
            .map(|index| Descriptor {
                index,
                buffer: vec![0u8; buffer_len],
            })
            .collect();
        Self {
            buffer_len,
            free,
            waiters: WaitQueue::new(),
            outstanding: 0,
            outage_count: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.free.len() + self.outstanding
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    /// `true` once every descriptor has been handed out. Used by drain logic
    /// that must wait for all metadata writes to land before completing.
    pub fn is_busy(&self) -> bool {
        self.outstanding > 0
    }

    pub fn outage_count(&self) -> u64 {
        self.outage_count.load(Ordering::Relaxed)
    }

    /// Hands a descriptor to `on_ready` immediately if one is free, otherwise
    /// queues `on_ready` to run the next time a descriptor is released.
    pub fn acquire(&mut self, on_ready: impl FnOnce(Descriptor) + Send + 'static) {
        match self.free.pop() {
            Some(descriptor) => {
                self.outstanding += 1;
                on_ready(descriptor);
            }
            None => {
                let outages = self.outage_count.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::warn!(outages, "descriptor pool exhausted, queuing acquirer");
                self.waiters.enqueue(Box::new(on_ready));
            }
        }
    }

    /// Returns a descriptor to the pool, waking the oldest queued acquirer
    /// if there is one instead of putting the buffer back on the free list.
    pub fn release(&mut self, mut descriptor: Descriptor) {
        self.outstanding -= 1;
        descriptor.buffer.iter_mut().for_each(|byte| *byte = 0);
        match self.waiters.dequeue() {
            Some(waiter) => {
                self.outstanding += 1;
                waiter(descriptor);
            }
            None => self.free.push(descriptor),
        }
    }
}
