//! Deduplication utilities.
//!
//! Two strategies:
//! - `deduplicate_retain` - in-place deduplication that keeps first occurrences
//! - `DeduplicationFilter` - prevents duplicates while collecting

use std::collections::HashSet;
use std::hash::Hash;

/// Deduplicate in-place, keeping the first item for each key.
///
/// # Example
/// ```ignore
/// let mut endpoints = vec![...];
/// deduplicate_retain(&mut endpoints, |e| e.clone());
/// ```
pub fn deduplicate_retain<T, F, K>(items: &mut Vec<T>, key_fn: F)
where
    F: Fn(&T) -> K,
    K: Eq + Hash + Clone,
{
    let mut seen: HashSet<K> = HashSet::new();
    items.retain(|item| seen.insert(key_fn(item)));
}

/// Check-before-adding filter.
///
/// # Example
/// ```ignore
/// let mut filter = DeduplicationFilter::new();
/// for route in routes {
///     if filter.should_process(route.accessor.clone()) {
///         // first route with this accessor
///     }
/// }
/// ```
#[derive(Debug)]
pub struct DeduplicationFilter<K: Eq + Hash> {
    processed: HashSet<K>,
}

impl<K: Eq + Hash> DeduplicationFilter<K> {
    /// Create a new empty deduplication filter
    pub fn new() -> Self {
        Self {
            processed: HashSet::new(),
        }
    }

    /// Returns true if the key is new (and records it), false if already seen.
    pub fn should_process(&mut self, key: K) -> bool {
        self.processed.insert(key)
    }
}

impl<K: Eq + Hash> Default for DeduplicationFilter<K> {
    fn default() -> Self {
        Self::new()
    }
}
