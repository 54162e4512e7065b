/*!

A time-ordered queue of plans. Plans at equal times run in the order they were added.
Cancelling a plan removes its payload immediately; the heap entry is discarded lazily when it
reaches the front of the queue.

*/

use crate::hashing::HashMap;
use std::{
    cmp::Ordering,
    collections::BinaryHeap,
};

/// A handle to a scheduled plan, used to cancel it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PlanId(pub(crate) u64);

#[derive(Debug)]
struct Entry {
    time: f64,
    id: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // `BinaryHeap` is a max-heap, so both keys are reversed to pop the earliest plan first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.id.cmp(&self.id))
    }
}

pub(crate) struct Queue<T> {
    heap: BinaryHeap<Entry>,
    payloads: HashMap<u64, T>,
    next_id: u64,
}

impl<T> Queue<T> {
    pub(crate) fn new() -> Self {
        Queue {
            heap: BinaryHeap::new(),
            payloads: HashMap::default(),
            next_id: 0,
        }
    }

    pub(crate) fn add_plan(&mut self, time: f64, payload: T) -> PlanId {
        let id = self.next_id;
        self.next_id += 1;
        self.heap.push(Entry { time, id });
        self.payloads.insert(id, payload);
        PlanId(id)
    }

    /// Removes the plan. Returns `false` if it already ran or was already cancelled.
    pub(crate) fn cancel_plan(&mut self, plan_id: &PlanId) -> bool {
        self.payloads.remove(&plan_id.0).is_some()
    }

    /// Pops the earliest live plan along with its scheduled time.
    pub(crate) fn get_next_plan(&mut self) -> Option<(f64, T)> {
        while let Some(entry) = self.heap.pop() {
            if let Some(payload) = self.payloads.remove(&entry.id) {
                return Some((entry.time, payload));
            }
        }
        None
    }

    pub(crate) fn remaining_plan_count(&self) -> usize {
        self.payloads.len()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.payloads.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_come_out_in_time_order() {
        let mut queue = Queue::new();
        queue.add_plan(3.0, "c");
        queue.add_plan(1.0, "a");
        queue.add_plan(2.0, "b");

        assert_eq!(queue.get_next_plan(), Some((1.0, "a")));
        assert_eq!(queue.get_next_plan(), Some((2.0, "b")));
        assert_eq!(queue.get_next_plan(), Some((3.0, "c")));
        assert_eq!(queue.get_next_plan(), None);
    }

    #[test]
    fn equal_times_are_first_in_first_out() {
        let mut queue = Queue::new();
        queue.add_plan(1.0, 1);
        queue.add_plan(1.0, 2);
        queue.add_plan(1.0, 3);

        assert_eq!(queue.get_next_plan(), Some((1.0, 1)));
        assert_eq!(queue.get_next_plan(), Some((1.0, 2)));
        assert_eq!(queue.get_next_plan(), Some((1.0, 3)));
    }

    #[test]
    fn cancelled_plans_are_skipped() {
        let mut queue = Queue::new();
        let first = queue.add_plan(1.0, "first");
        queue.add_plan(2.0, "second");

        assert!(queue.cancel_plan(&first));
        assert!(!queue.cancel_plan(&first));
        assert_eq!(queue.remaining_plan_count(), 1);
        assert_eq!(queue.get_next_plan(), Some((2.0, "second")));
        assert_eq!(queue.get_next_plan(), None);
    }
}
