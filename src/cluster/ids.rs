use std::sync::atomic::{AtomicU32, Ordering};

/// Hands out cluster ids for one run.
///
/// Ids start at 0 and increase by one per allocation. A driver creates one allocator
/// per run (or calls [`IdAllocator::reset`] before reusing it), so repeated runs in
/// the same process produce the same id sequence.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU32,
}

impl IdAllocator {
    /// Create an allocator whose first id is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next id.
    pub fn allocate(&self) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The id the next call to [`IdAllocator::allocate`] will return.
    pub fn peek(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }

    /// Restart the sequence at 0.
    pub fn reset(&self) {
        self.next.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_and_reset() {
        let ids = IdAllocator::new();
        assert_eq!(ids.allocate(), 0);
        assert_eq!(ids.allocate(), 1);
        assert_eq!(ids.peek(), 2);
        assert_eq!(ids.allocate(), 2);

        ids.reset();
        assert_eq!(ids.peek(), 0);
        assert_eq!(ids.allocate(), 0);
    }

    #[test]
    fn test_independent_runs() {
        let a = IdAllocator::new();
        let b = IdAllocator::new();
        a.allocate();
        a.allocate();
        assert_eq!(b.allocate(), 0);
    }

    #[test]
    fn test_shared_across_threads_is_unique() {
        let ids = IdAllocator::new();
        let mut all: Vec<u32> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..100).map(|_| ids.allocate()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        all.sort_unstable();
        assert_eq!(all, (0..400).collect::<Vec<_>>());
    }
}
