use crate::Algorithm;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// A* frontier entry: estimated total cost, path cost so far, cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstarEntry {
    pub key: u32,
    pub cost: u32,
    pub cell: usize,
}

impl PartialOrd for AstarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AstarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        // Whole tuple compared lexicographically: key, then cost, then cell
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

/// FIFO queue that can answer "is this cell already queued" in O(1)
#[derive(Debug, Clone)]
pub struct CellQueue {
    cells: VecDeque<usize>,
    members: Vec<bool>,
}

impl CellQueue {
    pub fn new(len: usize) -> Self {
        CellQueue {
            cells: VecDeque::new(),
            members: vec![false; len],
        }
    }

    pub fn push(&mut self, cell: usize) {
        self.cells.push_back(cell);
        self.members[cell] = true;
    }

    /// Pop the oldest cell
    pub fn pop(&mut self) -> Option<usize> {
        let cell = self.cells.pop_front()?;
        self.members[cell] = false;
        Some(cell)
    }

    pub fn contains(&self, cell: usize) -> bool {
        self.members[cell]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Cells pending exploration, shaped by the algorithm
#[derive(Debug, Clone)]
pub enum Frontier {
    /// FIFO queue (BFS)
    Queue(CellQueue),
    /// LIFO stack (DFS); the same cell may appear more than once
    Stack(Vec<usize>),
    /// Min-priority heap (A*); duplicate entries for a cell are allowed
    Heap(BinaryHeap<AstarEntry>),
}

impl Frontier {
    /// Empty frontier for a grid of `len` cells
    pub fn for_algorithm(algorithm: Algorithm, len: usize) -> Self {
        match algorithm {
            Algorithm::Bfs => Frontier::Queue(CellQueue::new(len)),
            Algorithm::Dfs => Frontier::Stack(Vec::new()),
            Algorithm::AStar => Frontier::Heap(BinaryHeap::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Queue(q) => q.len(),
            Frontier::Stack(s) => s.len(),
            Frontier::Heap(h) => h.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
