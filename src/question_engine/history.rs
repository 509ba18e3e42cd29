use std::collections::{HashSet, VecDeque};

/// Default number of recent question texts remembered.
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded recency set of emitted question texts.
///
/// Insertion-ordered: once `capacity` is exceeded the oldest text is evicted.
/// Owned by whoever drives generation (a session, an engine, a test), never
/// global.
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    order: VecDeque<String>,
    seen: HashSet<String>,
    capacity: usize,
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of 0 is bumped to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        HistoryTracker {
            order: VecDeque::with_capacity(capacity + 1),
            seen: HashSet::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn contains(&self, text: &str) -> bool {
        self.seen.contains(text)
    }

    /// Record `text`. Re-recording a known text is a no-op (it keeps its
    /// original position in the eviction order).
    pub fn record(&mut self, text: &str) {
        if !self.seen.insert(text.to_string()) {
            return;
        }
        self.order.push_back(text.to_string());
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
