//! Collapse scheduling
//!
//! An indexed min-priority queue over pair ids. Costs can be changed in place
//! after a contraction and resolved pairs removed, so the queue never has to be
//! rebuilt from scratch inside the loop.

use crate::pairs::PairIndex;
use priority_queue::PriorityQueue;
use std::cmp::Ordering;
use std::fmt;

/// Queue priority: lowest cost first, lowest pair id among equal costs.
#[derive(Debug, Clone, Copy)]
struct CollapsePriority {
    cost: f64,
    id: usize,
}

impl PartialEq for CollapsePriority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CollapsePriority {}

impl PartialOrd for CollapsePriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CollapsePriority {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smallest cost first
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Priority queue of live pairs ordered by ascending cost.
pub struct CollapseScheduler {
    queue: PriorityQueue<usize, CollapsePriority>,
}

impl Default for CollapseScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CollapseScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollapseScheduler")
            .field("queued", &self.queue.len())
            .field("min", &self.peek_min())
            .finish()
    }
}

impl CollapseScheduler {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
        }
    }

    /// Build a queue over every live pair
    pub fn from_pairs(pairs: &PairIndex) -> Self {
        let mut scheduler = Self::new();
        scheduler.rebuild(pairs);
        scheduler
    }

    /// Discard the current ordering and re-queue every live pair at its current cost
    pub fn rebuild(&mut self, pairs: &PairIndex) {
        self.queue = PriorityQueue::with_capacity(pairs.len());
        for (id, pair) in pairs.iter() {
            if pair.is_live() {
                self.queue.push(id, CollapsePriority { cost: pair.cost, id });
            }
        }
    }

    /// Remove and return the cheapest pair id with its cost
    pub fn pop_min(&mut self) -> Option<(usize, f64)> {
        self.queue.pop().map(|(id, priority)| (id, priority.cost))
    }

    /// The cheapest pair id with its cost, without removing it
    pub fn peek_min(&self) -> Option<(usize, f64)> {
        self.queue.peek().map(|(&id, priority)| (id, priority.cost))
    }

    /// Insert a pair or move it to a new cost
    pub fn update(&mut self, id: usize, cost: f64) {
        self.queue.push(id, CollapsePriority { cost, id });
    }

    /// Drop a pair from the queue; returns whether it was queued
    pub fn remove(&mut self, id: usize) -> bool {
        self.queue.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
