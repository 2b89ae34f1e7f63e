/// Default process-wide cap on live graphics contexts.
///
/// Browsers hand out a small number of hardware-accelerated contexts per
/// page; holding more than a couple gets the oldest silently killed anyway,
/// so we evict deliberately instead.
pub const DEFAULT_CONTEXT_CAP: usize = 2;

/// Bookkeeping for live context handles, bounded at `cap`.
///
/// Single-threaded by construction: the owning app injects one registry and
/// calls it from its event loop, so there is nothing to lock. Oldest-acquired
/// contexts are evicted first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRegistry {
    cap: usize,
    // Acquisition order, oldest first.
    live: Vec<u64>,
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_CAP)
    }
}

impl ContextRegistry {
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            live: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.live.contains(&id)
    }

    /// Registers `id` as live and returns the ids evicted to stay under the
    /// cap. The caller must dispose the evicted contexts. Re-acquiring an id
    /// already present refreshes its position to newest.
    pub fn acquire(&mut self, id: u64) -> Vec<u64> {
        self.live.retain(|&existing| existing != id);
        self.live.push(id);

        let mut evicted = Vec::new();
        while self.live.len() > self.cap {
            evicted.push(self.live.remove(0));
        }
        evicted
    }

    /// Removes `id`; returns whether it was registered.
    pub fn release(&mut self, id: u64) -> bool {
        let before = self.live.len();
        self.live.retain(|&existing| existing != id);
        self.live.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::ContextRegistry;
    use pretty_assertions::assert_eq;

    #[test]
    fn stays_under_cap_by_evicting_oldest() {
        let mut registry = ContextRegistry::new(2);
        assert_eq!(registry.acquire(1), vec![]);
        assert_eq!(registry.acquire(2), vec![]);
        // Third acquisition pushes out the first-created context.
        assert_eq!(registry.acquire(3), vec![1]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.contains(1));
        assert!(registry.contains(2));
        assert!(registry.contains(3));
    }

    #[test]
    fn release_frees_a_slot() {
        let mut registry = ContextRegistry::new(2);
        registry.acquire(1);
        registry.acquire(2);
        assert!(registry.release(1));
        assert!(!registry.release(1));
        assert_eq!(registry.acquire(3), vec![]);
    }

    #[test]
    fn reacquiring_refreshes_age() {
        let mut registry = ContextRegistry::new(2);
        registry.acquire(1);
        registry.acquire(2);
        registry.acquire(1);
        // 2 is now the oldest.
        assert_eq!(registry.acquire(3), vec![2]);
    }

    #[test]
    fn cap_of_zero_is_treated_as_one() {
        let mut registry = ContextRegistry::new(0);
        assert_eq!(registry.acquire(1), vec![]);
        assert_eq!(registry.acquire(2), vec![1]);
        assert_eq!(registry.len(), 1);
    }
}
