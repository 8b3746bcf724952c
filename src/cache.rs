//! Memoized validation keyed by code hash.

use std::{
    fmt,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard},
};

use log::trace;
use lru::LruCache;
use primitive_types::H256;
use sha3::{Digest, Keccak256};

use crate::{error::ValidationError, validate::validate, valids::Valids};

type Outcome = Result<Arc<Valids>, ValidationError>;

/// Number of outcomes kept by [`JumpDestCache::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Keccak-256 hash of `code`.
pub fn code_hash(code: impl AsRef<[u8]>) -> H256 {
    H256::from_slice(Keccak256::digest(code.as_ref()).as_slice())
}

/// Bounded cache of validation outcomes, shared across threads.
///
/// Rejections are cached as well as jump destination bitmaps. Once the
/// capacity is reached the least recently used outcome is evicted.
pub struct JumpDestCache {
    entries: Mutex<LruCache<H256, Outcome>>,
}

impl JumpDestCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A cache holding at most `capacity` outcomes. A capacity of zero is
    /// treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        JumpDestCache {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<H256, Outcome>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the cached outcome for `code`, validating it on a miss.
    pub fn get_or_validate(&self, code: impl AsRef<[u8]>) -> Outcome {
        let code = code.as_ref();
        let hash = code_hash(code);
        if let Some(outcome) = self.get(&hash) {
            trace!("jumpdest cache hit for {hash:?}");
            return outcome;
        }

        // Validate outside the lock; a concurrent miss on the same hash
        // keeps whichever outcome was stored first.
        let outcome = validate(code).map(Arc::new);
        let mut entries = self.lock();
        if let Some(existing) = entries.get(&hash) {
            return existing.clone();
        }
        if let Some((evicted, _)) = entries.push(hash, outcome.clone()) {
            trace!("jumpdest cache evicted {evicted:?}");
        }
        outcome
    }

    /// Cached outcome for the code with the given hash.
    pub fn get(&self, hash: &H256) -> Option<Outcome> {
        self.lock().get(hash).cloned()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for JumpDestCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JumpDestCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.lock();
        f.debug_struct("JumpDestCache")
            .field("len", &entries.len())
            .field("capacity", &entries.cap())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::opcodes::{ADD, JUMPDEST, STOP};

    #[test]
    fn hash_of_empty_code() {
        assert_eq!(
            format!("{:?}", code_hash([0u8; 0])),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn caches_successes() {
        let cache = JumpDestCache::new();
        let first = cache.get_or_validate([JUMPDEST, STOP]).unwrap();
        let second = cache.get_or_validate([JUMPDEST, STOP]).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(first.is_valid(0));
    }

    #[test]
    fn caches_rejections() {
        let cache = JumpDestCache::new();
        let code = [STOP, ADD];
        assert_eq!(
            cache.get_or_validate(code),
            Err(ValidationError::MissingTerminator)
        );
        assert_eq!(
            cache.get(&code_hash(code)),
            Some(Err(ValidationError::MissingTerminator))
        );
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = JumpDestCache::new();
        cache.get_or_validate([STOP]).unwrap();
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn never_exceeds_capacity() {
        let cache = JumpDestCache::with_capacity(3);
        for extra in 0..10u8 {
            // ten distinct code buffers
            let _ = cache.get_or_validate([ADD, extra]);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = JumpDestCache::with_capacity(2);
        let first = [STOP];
        let second = [JUMPDEST, STOP];
        let third = [JUMPDEST, JUMPDEST, STOP];
        cache.get_or_validate(first).unwrap();
        cache.get_or_validate(second).unwrap();
        // touch first so second becomes the oldest
        assert!(cache.get(&code_hash(first)).is_some());
        cache.get_or_validate(third).unwrap();
        assert!(cache.get(&code_hash(first)).is_some());
        assert!(cache.get(&code_hash(second)).is_none());
        assert!(cache.get(&code_hash(third)).is_some());
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let cache = JumpDestCache::with_capacity(0);
        cache.get_or_validate([STOP]).unwrap();
        cache.get_or_validate([JUMPDEST, STOP]).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(JumpDestCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_validate([JUMPDEST, JUMPDEST, STOP]))
            })
            .collect();
        for handle in handles {
            let valids = handle.join().unwrap().unwrap();
            assert_eq!(valids.iter().collect::<Vec<_>>(), vec![0, 1]);
        }
        assert_eq!(cache.len(), 1);
    }
}
