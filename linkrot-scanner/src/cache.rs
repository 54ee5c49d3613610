use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Run-wide set of URLs that have already been claimed, either for a page
/// visit or for a link check. Entries are never removed.
#[derive(Debug, Default)]
pub struct LinkCache {
    seen: Mutex<HashSet<String>>,
}

impl LinkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` unless it is already present and reports whether it was.
    ///
    /// Check and insert happen under one lock, so among any number of
    /// concurrent callers with the same key exactly one gets `false`.
    pub fn add_if_absent(&self, key: &str) -> bool {
        let mut seen = self.lock();
        if seen.contains(key) {
            return true;
        }
        seen.insert(key.to_string());
        false
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic elsewhere can't leave the set half-updated
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_first_add_claims() {
        let cache = LinkCache::new();
        assert!(cache.is_empty());
        assert!(!cache.add_if_absent("http://x/a"));
        assert!(cache.add_if_absent("http://x/a"));
        assert!(cache.add_if_absent("http://x/a"));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("http://x/a"));
    }

    #[test]
    fn test_keys_are_exact_strings() {
        let cache = LinkCache::new();
        assert!(!cache.add_if_absent("http://x/a"));
        assert!(!cache.add_if_absent("http://x/a/"));
        assert!(!cache.add_if_absent("http://X/a"));
        assert_eq!(cache.len(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_claim_is_won_once() {
        let cache = Arc::new(LinkCache::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..64 {
            let cache = cache.clone();
            let winners = winners.clone();
            handles.push(tokio::spawn(async move {
                if !cache.add_if_absent("http://ext.com/race") {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }
}
