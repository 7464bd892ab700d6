use crate::frontier::{AstarEntry, CellQueue, Frontier};
use crate::report::{CellStatus, ChangeReport};
use crate::{Algorithm, CellKind, Grid, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Where a run stands after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStatus {
    /// Frontier still has work
    Searching,
    /// End cell was checked and the path reconstructed
    Found,
    /// Frontier emptied without reaching the end cell
    Exhausted,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        self != SearchStatus::Searching
    }
}

/// Result of a single `step` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Cells that changed during this step only
    pub changes: ChangeReport,
    pub status: SearchStatus,
}

impl StepOutcome {
    /// Completion flag: true only on a successful search
    pub fn is_complete(&self) -> bool {
        self.status == SearchStatus::Found
    }
}

/// Diagnostic counters for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub steps: usize,
    /// Frontier pops (a DFS cell popped twice counts twice)
    pub checked: usize,
    /// Frontier admissions, including the start cell
    pub queued: usize,
    pub path_len: Option<usize>,
    pub elapsed: Duration,
}

/// Manhattan distance between two cells of a grid with side `size`
pub fn manhattan(size: usize, a: usize, b: usize) -> u32 {
    let (a_row, a_col) = (a / size, a % size);
    let (b_row, b_col) = (b / size, b % size);
    (a_col.abs_diff(b_col) + a_row.abs_diff(b_row)) as u32
}

/// Per-run tables shared by every strategy
#[derive(Debug, Clone)]
struct Exploration {
    grid: Grid,
    end: usize,
    visited: Vec<bool>,
    parents: Vec<Option<usize>>,
    /// Best known distance from start; only populated for A*
    costs: Vec<Option<u32>>,
    checked: usize,
    queued: usize,
}

impl Exploration {
    fn admit(&mut self, cell: usize, parent: usize, changes: &mut ChangeReport) {
        self.parents[cell] = Some(parent);
        self.queued += 1;
        changes.mark(cell, CellStatus::Queued);
    }

    fn step_bfs(&mut self, queue: &mut CellQueue, changes: &mut ChangeReport) -> Option<Vec<usize>> {
        let n = queue.pop()?;
        self.checked += 1;
        self.visited[n] = true;
        changes.mark(n, CellStatus::Checked);

        if n == self.end {
            return Some(self.backtrack(n, changes));
        }

        for neighbor in self.grid.neighbors_unchecked(n) {
            if !self.visited[neighbor] && !queue.contains(neighbor) {
                queue.push(neighbor);
                self.admit(neighbor, n, changes);
            }
        }
        None
    }

    fn step_dfs(&mut self, stack: &mut Vec<usize>, changes: &mut ChangeReport) -> Option<Vec<usize>> {
        let n = stack.pop()?;
        self.checked += 1;
        self.visited[n] = true;
        changes.mark(n, CellStatus::Checked);

        if n == self.end {
            return Some(self.backtrack(n, changes));
        }

        // Only the visited mark guards admission; a cell may be stacked twice
        for neighbor in self.grid.neighbors_unchecked(n) {
            if !self.visited[neighbor] {
                stack.push(neighbor);
                self.admit(neighbor, n, changes);
            }
        }
        None
    }

    fn step_astar(
        &mut self,
        heap: &mut BinaryHeap<AstarEntry>,
        changes: &mut ChangeReport,
    ) -> Option<Vec<usize>> {
        let current = heap.pop()?;
        self.checked += 1;
        changes.mark(current.cell, CellStatus::Checked);

        if current.cell == self.end {
            return Some(self.backtrack(current.cell, changes));
        }

        let size = self.grid.size();
        for neighbor in self.grid.neighbors_unchecked(current.cell) {
            let cost = current.cost + 1;
            if self.costs[neighbor].map_or(true, |best| cost < best) {
                self.costs[neighbor] = Some(cost);
                self.parents[neighbor] = Some(current.cell);
            }
            if !self.visited[neighbor] {
                self.visited[neighbor] = true;
                heap.push(AstarEntry {
                    key: cost + manhattan(size, neighbor, self.end),
                    cost,
                    cell: neighbor,
                });
                self.queued += 1;
                changes.mark(neighbor, CellStatus::Queued);
            }
        }
        None
    }

    /// Follow parent links from `end`; the returned path runs end to start
    fn backtrack(&self, end: usize, changes: &mut ChangeReport) -> Vec<usize> {
        let path = self.chain(end);
        for &cell in &path {
            changes.mark(cell, CellStatus::OnPath);
        }
        path
    }

    fn chain(&self, end: usize) -> Vec<usize> {
        let mut path = vec![end];
        let mut current = end;
        while let Some(parent) = self.parents[current] {
            path.push(parent);
            current = parent;
        }
        path
    }
}

/// Incremental search over a grid snapshot.
///
/// Created by [`Search::new`] and advanced one frontier pop per [`Search::step`].
/// The snapshot is owned by the run, so edits made to the driver's grid after
/// initialization never leak into an active search.
#[derive(Debug, Clone)]
pub struct Search {
    algorithm: Algorithm,
    start: usize,
    frontier: Frontier,
    exploration: Exploration,
    status: SearchStatus,
    path: Option<Vec<usize>>,
    steps: usize,
    started: Instant,
    finished_after: Option<Duration>,
}

impl Search {
    /// Initialize a run: validate endpoints, reset tables, seed the frontier with `start`
    pub fn new(
        grid: &Grid,
        algorithm: Algorithm,
        start: usize,
        end: usize,
    ) -> Result<Self, SearchError> {
        validate_endpoints(grid, start, end)?;

        let len = grid.len();
        let mut frontier = Frontier::for_algorithm(algorithm, len);
        let mut exploration = Exploration {
            grid: grid.clone(),
            end,
            visited: vec![false; len],
            parents: vec![None; len],
            costs: Vec::new(),
            checked: 0,
            queued: 1,
        };
        exploration.visited[start] = true;

        match &mut frontier {
            Frontier::Queue(queue) => queue.push(start),
            Frontier::Stack(stack) => stack.push(start),
            Frontier::Heap(heap) => {
                exploration.costs = vec![None; len];
                // Start is pinned at zero so relaxation can never give it a parent
                exploration.costs[start] = Some(0);
                heap.push(AstarEntry {
                    key: manhattan(grid.size(), start, end),
                    cost: 0,
                    cell: start,
                });
            }
        }

        debug!(
            algorithm = %algorithm,
            start,
            end,
            size = grid.size(),
            walls = grid.wall_count(),
            "search initialized"
        );

        Ok(Search {
            algorithm,
            start,
            frontier,
            exploration,
            status: SearchStatus::Searching,
            path: None,
            steps: 0,
            started: Instant::now(),
            finished_after: None,
        })
    }

    /// Initialize from a selector literal ("BFS", "A*", "DFS")
    pub fn from_selector(
        grid: &Grid,
        selector: &str,
        start: usize,
        end: usize,
    ) -> Result<Self, SearchError> {
        let algorithm = selector.parse()?;
        Self::new(grid, algorithm, start, end)
    }

    /// Perform one unit of exploration.
    ///
    /// Once the run is terminal every further call returns an empty report
    /// with the same terminal status.
    pub fn step(&mut self) -> StepOutcome {
        let mut changes = ChangeReport::new();
        if self.status.is_terminal() {
            return StepOutcome {
                changes,
                status: self.status,
            };
        }

        if self.frontier.is_empty() {
            self.finish(SearchStatus::Exhausted);
            warn!(
                algorithm = %self.algorithm,
                steps = self.steps,
                checked = self.exploration.checked,
                "frontier exhausted, no path"
            );
            return StepOutcome {
                changes,
                status: self.status,
            };
        }

        self.steps += 1;
        let found = match &mut self.frontier {
            Frontier::Queue(queue) => self.exploration.step_bfs(queue, &mut changes),
            Frontier::Stack(stack) => self.exploration.step_dfs(stack, &mut changes),
            Frontier::Heap(heap) => self.exploration.step_astar(heap, &mut changes),
        };
        trace!(step = self.steps, changed = changes.len(), frontier = self.frontier.len(), "step");

        if let Some(path) = found {
            self.finish(SearchStatus::Found);
            info!(
                algorithm = %self.algorithm,
                steps = self.steps,
                checked = self.exploration.checked,
                path_len = path.len(),
                elapsed = ?self.elapsed(),
                "path found"
            );
            self.path = Some(path);
        }

        StepOutcome {
            changes,
            status: self.status,
        }
    }

    /// Step until the run is terminal, returning every outcome in order
    pub fn run_to_end(&mut self) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        while !self.status.is_terminal() {
            outcomes.push(self.step());
        }
        outcomes
    }

    /// Parent chain from `end` back to the start, both inclusive.
    /// Cells never discovered yield a single-element chain.
    pub fn reconstruct_path(&self, end: usize) -> Result<Vec<usize>, SearchError> {
        self.exploration.grid.kind_of(end)?;
        Ok(self.exploration.chain(end))
    }

    fn finish(&mut self, status: SearchStatus) {
        self.status = status;
        self.finished_after = Some(self.started.elapsed());
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.exploration.end
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The grid snapshot this run searches
    pub fn grid(&self) -> &Grid {
        &self.exploration.grid
    }

    /// Reconstructed path (end to start), available once found
    pub fn path(&self) -> Option<&[usize]> {
        self.path.as_deref()
    }

    pub fn parent_of(&self, cell: usize) -> Option<usize> {
        self.exploration.parents.get(cell).copied().flatten()
    }

    /// Best known A* cost for `cell`; always None for BFS and DFS
    pub fn cost_of(&self, cell: usize) -> Option<u32> {
        self.exploration.costs.get(cell).copied().flatten()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Time since initialization, frozen once the run is terminal
    pub fn elapsed(&self) -> Duration {
        self.finished_after.unwrap_or_else(|| self.started.elapsed())
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            steps: self.steps,
            checked: self.exploration.checked,
            queued: self.exploration.queued,
            path_len: self.path.as_ref().map(Vec::len),
            elapsed: self.elapsed(),
        }
    }
}

fn validate_endpoints(grid: &Grid, start: usize, end: usize) -> Result<(), SearchError> {
    for cell in [start, end] {
        if !grid.contains(cell) {
            return Err(SearchError::InvalidEndpoint {
                cell,
                reason: "out of bounds",
            });
        }
    }
    if start == end {
        return Err(SearchError::InvalidEndpoint {
            cell: start,
            reason: "start and end are the same cell",
        });
    }

    match grid.kind_of(start)? {
        CellKind::Wall => Err(SearchError::InvalidEndpoint {
            cell: start,
            reason: "start is a wall",
        }),
        CellKind::End => Err(SearchError::InvalidEndpoint {
            cell: start,
            reason: "start is the end cell",
        }),
        _ => match grid.kind_of(end)? {
            CellKind::Wall => Err(SearchError::InvalidEndpoint {
                cell: end,
                reason: "end is a wall",
            }),
            CellKind::Start => Err(SearchError::InvalidEndpoint {
                cell: end,
                reason: "end is the start cell",
            }),
            _ => Ok(()),
        },
    }
}
