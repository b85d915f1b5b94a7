use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, VecDeque},
};

use crate::{grid::Coord, search::Strategy};

/// Heap entry ordered by priority, then by insertion sequence.
///
/// The sequence number makes equal-priority entries pop in the order they
/// were pushed.
#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    seq: u64,
    coord: Coord,
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
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Discovered-but-not-finalized nodes, in the discipline of one strategy.
#[derive(Debug, Clone)]
pub(crate) enum Frontier {
    Queue(VecDeque<Coord>),
    Stack(Vec<Coord>),
    Heap {
        heap: BinaryHeap<Reverse<Entry>>,
        next_seq: u64,
    },
}

impl Frontier {
    pub(crate) fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::BreadthFirst => Frontier::Queue(VecDeque::new()),
            Strategy::DepthFirst => Frontier::Stack(Vec::new()),
            Strategy::Dijkstra | Strategy::AStar => Frontier::Heap {
                heap: BinaryHeap::new(),
                next_seq: 0,
            },
        }
    }

    /// Adds `coord` to the frontier. `priority` is ignored by FIFO/LIFO frontiers.
    pub(crate) fn push(&mut self, coord: Coord, priority: f64) {
        match self {
            Frontier::Queue(queue) => queue.push_back(coord),
            Frontier::Stack(stack) => stack.push(coord),
            Frontier::Heap { heap, next_seq } => {
                heap.push(Reverse(Entry {
                    priority,
                    seq: *next_seq,
                    coord,
                }));
                *next_seq += 1;
            }
        }
    }

    pub(crate) fn pop(&mut self) -> Option<Coord> {
        match self {
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Heap { heap, .. } => heap.pop().map(|Reverse(entry)| entry.coord),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Frontier::Queue(queue) => queue.len(),
            Frontier::Stack(stack) => stack.len(),
            Frontier::Heap { heap, .. } => heap.len(),
        }
    }
}
