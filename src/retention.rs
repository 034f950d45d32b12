//! Bounded window of recently published message ids.

use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Number of ids kept after each trim.
pub const DEFAULT_RETENTION_CAP: usize = 50;

/// Shared list of recently published message ids.
///
/// Appends are unbounded; the bound is enforced by periodic `trim` calls.
/// Clones share the same list, and every operation runs under one lock so
/// the loop, the trim task and read scheduling can interleave freely.
#[derive(Clone, Debug)]
pub struct RetentionBuffer {
    ids: Arc<Mutex<Vec<String>>>,
    cap: usize,
}

impl RetentionBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            ids: Arc::new(Mutex::new(Vec::new())),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Append `id`.
    pub fn record(&self, id: impl Into<String>) {
        self.lock().push(id.into());
    }

    /// Drop the oldest ids so at most `cap` remain, returning how many were dropped.
    pub fn trim(&self) -> usize {
        let mut ids = self.lock();
        let excess = ids.len().saturating_sub(self.cap);
        if excess > 0 {
            ids.drain(..excess);
        }
        excess
    }

    /// Pick one id uniformly, or `None` if nothing has been recorded.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        let ids = self.lock();
        if ids.is_empty() {
            return None;
        }
        Some(ids[rng.gen_range(0..ids.len())].clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RetentionBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ids(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
        range.map(|i| format!("m{i}")).collect()
    }

    #[test]
    fn test_trim_keeps_most_recent() {
        let buffer = RetentionBuffer::new(50);
        for id in ids(1..=60) {
            buffer.record(id);
        }

        assert_eq!(buffer.trim(), 10);
        assert_eq!(buffer.snapshot(), ids(11..=60));
    }

    #[test]
    fn test_trim_within_bound_is_noop() {
        let buffer = RetentionBuffer::new(50);
        for id in ids(1..=50) {
            buffer.record(id);
        }

        assert_eq!(buffer.trim(), 0);
        assert_eq!(buffer.trim(), 0);
        assert_eq!(buffer.snapshot(), ids(1..=50));
    }

    #[test]
    fn test_record_does_not_enforce_cap() {
        let buffer = RetentionBuffer::new(2);
        for id in ids(1..=5) {
            buffer.record(id);
        }
        assert_eq!(buffer.len(), 5);

        buffer.trim();
        assert_eq!(buffer.snapshot(), ids(4..=5));
    }

    #[test]
    fn test_trim_never_exceeds_cap() {
        let mut rng = StdRng::seed_from_u64(42);
        let buffer = RetentionBuffer::new(7);
        let mut recorded = Vec::new();

        for round in 0..50 {
            let count = rng.gen_range(0..20);
            for i in 0..count {
                let id = format!("r{round}-{i}");
                recorded.push(id.clone());
                buffer.record(id);
            }
            buffer.trim();

            assert!(buffer.len() <= 7);
            let start = recorded.len().saturating_sub(7);
            assert_eq!(buffer.snapshot(), recorded[start..].to_vec());
        }
    }

    #[test]
    fn test_sample_empty() {
        let buffer = RetentionBuffer::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(buffer.sample(&mut rng), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sample_returns_present_id() {
        let buffer = RetentionBuffer::default();
        let mut rng = StdRng::seed_from_u64(1);
        for id in ids(1..=10) {
            buffer.record(id);
        }

        let contents = buffer.snapshot();
        for _ in 0..200 {
            let picked = buffer.sample(&mut rng).unwrap();
            assert!(contents.contains(&picked));
        }
    }

    #[test]
    fn test_clones_share_contents() {
        let buffer = RetentionBuffer::new(3);
        let handle = buffer.clone();

        handle.record("m1");
        assert_eq!(buffer.snapshot(), vec!["m1".to_string()]);
        assert_eq!(handle.cap(), 3);
    }

    #[test]
    fn test_concurrent_record_and_trim() {
        let buffer = RetentionBuffer::new(10);

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let buffer = buffer.clone();
                std::thread::spawn(move || {
                    for i in 0..1_000 {
                        buffer.record(format!("w{w}-{i}"));
                        if i % 100 == 0 {
                            buffer.trim();
                        }
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        buffer.trim();
        assert_eq!(buffer.len(), 10);
    }
}
