//! Step-resumable grid searches.
//!
//! A [`Search`] is an explicit state object: its frontier, cost table and
//! parent links are plain fields, and [`Search::advance`] performs exactly one
//! unit of work (pop one node, expand it) before handing control back. A caller
//! can therefore interleave rendering or other work between steps, stop at any
//! point, or drain the search with [`Search::run_to_end`].
//!
//! # Strategies
//!
//! | Strategy | Frontier | Cost |
//! |---|---|---|
//! | [`Strategy::BreadthFirst`] | FIFO queue | none, first discovery wins |
//! | [`Strategy::DepthFirst`] | LIFO stack | none, first discovery wins |
//! | [`Strategy::Dijkstra`] | min-heap on `g` | `g + 1` per move |
//! | [`Strategy::AStar`] | min-heap on `g + w·h` | `g + movement_cost` per move, `h` = Manhattan |
//!
//! Heap ties pop in insertion order. Dijkstra and A* finalize a node on its
//! first pop; later heap entries for the same node are discarded without
//! counting a step.
//!
//! # Grid ownership
//!
//! A search either owns a private copy of the grid ([`GridHandle::Owned`]) so
//! its markings stay invisible to the caller, or borrows the caller's grid
//! ([`GridHandle::Shared`]) so visited cells and the final path show up there.
//!
//! # Example
//!
//! ```
//! use gridpath_engine::{AStarParams, Grid, Progress, Search, Strategy};
//!
//! let mut grid: Grid = "S...\n.##.\n...G".parse().unwrap();
//! let mut search = Search::shared(&mut grid, Strategy::BreadthFirst, AStarParams::default());
//!
//! while search.advance() == Progress::Continue {
//!     // draw the grid, sleep, ...
//! }
//! let path = search.reconstruct_path();
//! assert_eq!(path.len(), 5);
//! ```

use std::{
    collections::{HashMap, HashSet},
    ops::{Deref, DerefMut},
};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{
    frontier::Frontier,
    grid::{Coord, Grid},
    path::{self, ParentMap},
};

/// Search strategy. Also used as the path-kind marker painted on the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Strategy {
    #[display("BFS")]
    BreadthFirst,
    #[display("DFS")]
    DepthFirst,
    #[display("Dijkstra")]
    Dijkstra,
    #[display("A*")]
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::Dijkstra,
        Strategy::AStar,
    ];

    fn is_weighted(self) -> bool {
        matches!(self, Strategy::Dijkstra | Strategy::AStar)
    }
}

/// Tunable parameters of the A* strategy.
///
/// Other strategies ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AStarParams {
    /// Multiplier applied to the Manhattan heuristic.
    pub heuristic_weight: f64,
    /// Cost added to `g` for every move.
    pub movement_cost: f64,
}

impl Default for AStarParams {
    fn default() -> Self {
        Self {
            heuristic_weight: 1.0,
            movement_cost: 1.0,
        }
    }
}

/// The grid a [`Search`] operates on.
#[derive(Debug)]
pub enum GridHandle<'a> {
    /// Private copy; markings are discarded with the search.
    Owned(Grid),
    /// The caller's grid; markings are observable by the caller.
    Shared(&'a mut Grid),
}

impl Deref for GridHandle<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        match self {
            GridHandle::Owned(grid) => grid,
            GridHandle::Shared(grid) => grid,
        }
    }
}

impl DerefMut for GridHandle<'_> {
    fn deref_mut(&mut self) -> &mut Grid {
        match self {
            GridHandle::Owned(grid) => grid,
            GridHandle::Shared(grid) => grid,
        }
    }
}

/// Result of one [`Search::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Progress {
    /// One node was expanded; more work remains.
    Continue,
    /// The goal was popped.
    Success,
    /// The frontier is exhausted, or the grid has no start or goal.
    Failure,
}

impl Progress {
    fn from_outcome(success: bool) -> Self {
        if success {
            Progress::Success
        } else {
            Progress::Failure
        }
    }
}

/// Summary of a search, detached from the grid it ran on.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub success: bool,
    /// Number of nodes popped from the frontier.
    pub steps: usize,
    /// Number of visited nodes, counted as described by the mode that produced the report.
    pub visited: usize,
    pub start: Option<Coord>,
    pub goal: Option<Coord>,
    pub parents: ParentMap,
}

impl SearchReport {
    /// Reconstructs the path without touching any grid.
    ///
    /// Empty when the grid had no start or goal, or no path was recorded.
    #[must_use]
    pub fn path(&self) -> Vec<Coord> {
        match (self.start, self.goal) {
            (Some(start), Some(goal)) => path::reconstruct(&self.parents, start, goal),
            _ => vec![],
        }
    }
}

/// Grid-independent search state shared by the suspending and fast modes.
#[derive(Debug, Clone)]
struct Core {
    strategy: Strategy,
    params: AStarParams,
    start: Option<Coord>,
    goal: Option<Coord>,
    frontier: Frontier,
    discovered: HashSet<Coord>,
    cost: HashMap<Coord, f64>,
    closed: HashSet<Coord>,
    parents: ParentMap,
    steps: usize,
    outcome: Option<bool>,
}

impl Core {
    fn new(grid: &Grid, strategy: Strategy, params: AStarParams) -> Self {
        let start = grid.start();
        let goal = grid.goal();
        let mut core = Self {
            strategy,
            params,
            start,
            goal,
            frontier: Frontier::for_strategy(strategy),
            discovered: HashSet::new(),
            cost: HashMap::new(),
            closed: HashSet::new(),
            parents: ParentMap::new(),
            steps: 0,
            outcome: None,
        };

        match (start, goal) {
            (Some(start), Some(_)) => {
                core.frontier.push(start, 0.0);
                if strategy.is_weighted() {
                    core.cost.insert(start, 0.0);
                } else {
                    core.discovered.insert(start);
                }
            }
            _ => core.outcome = Some(false),
        }
        core
    }

    fn heuristic(&self, coord: Coord) -> f64 {
        self.goal
            .map_or(0.0, |goal| usize_to_f64(coord.manhattan(goal)))
    }

    /// Records and enqueues the neighbors of `node`, returning the ones whose
    /// parent link was written.
    fn expand(&mut self, grid: &Grid, node: Coord) -> ArrayVec<Coord, 4> {
        let mut touched = ArrayVec::new();
        for neighbor in grid.neighbors(node) {
            match self.strategy {
                Strategy::BreadthFirst | Strategy::DepthFirst => {
                    if !self.discovered.insert(neighbor) {
                        continue;
                    }
                    self.frontier.push(neighbor, 0.0);
                }
                Strategy::Dijkstra | Strategy::AStar => {
                    if self.closed.contains(&neighbor) {
                        continue;
                    }
                    let (move_cost, weight) = match self.strategy {
                        Strategy::AStar => (self.params.movement_cost, self.params.heuristic_weight),
                        _ => (1.0, 0.0),
                    };
                    let g = self.cost.get(&node).copied().unwrap_or_default() + move_cost;
                    if self.cost.get(&neighbor).is_some_and(|&known| g >= known) {
                        continue;
                    }
                    self.cost.insert(neighbor, g);
                    self.frontier
                        .push(neighbor, g + weight * self.heuristic(neighbor));
                }
            }
            self.parents.insert(neighbor, node);
            touched.push(neighbor);
        }
        touched
    }

    fn step(&mut self, grid: &Grid) -> (Progress, ArrayVec<Coord, 4>) {
        if let Some(success) = self.outcome {
            return (Progress::from_outcome(success), ArrayVec::new());
        }
        let Some(node) = self.frontier.pop() else {
            self.outcome = Some(false);
            return (Progress::Failure, ArrayVec::new());
        };
        self.steps += 1;
        // An outdated heap entry of a finalized node still costs a step.
        if self.strategy.is_weighted() && !self.closed.insert(node) {
            return (Progress::Continue, ArrayVec::new());
        }
        if Some(node) == self.goal {
            self.outcome = Some(true);
            return (Progress::Success, ArrayVec::new());
        }
        (Progress::Continue, self.expand(grid, node))
    }
}

#[expect(clippy::cast_precision_loss)]
fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// A resumable search over a grid.
///
/// In the suspending mode driven by [`advance`](Self::advance), a node counts
/// as visited when its cell turns from `Free` to `Visited`; the start and goal
/// cells are never counted.
#[derive(Debug)]
pub struct Search<'a> {
    grid: GridHandle<'a>,
    core: Core,
    visited: usize,
    path_kind: Strategy,
}

impl<'a> Search<'a> {
    /// Creates a search positioned before its first step.
    ///
    /// If the grid has no start or no goal the search is born finished:
    /// every `advance` reports [`Progress::Failure`] and no step is taken.
    #[must_use]
    pub fn new(grid: GridHandle<'a>, strategy: Strategy, params: AStarParams) -> Self {
        let core = Core::new(&grid, strategy, params);
        Self {
            grid,
            core,
            visited: 0,
            path_kind: strategy,
        }
    }

    /// Searches a private copy of `grid`.
    #[must_use]
    pub fn owned(grid: Grid, strategy: Strategy, params: AStarParams) -> Self {
        Self::new(GridHandle::Owned(grid), strategy, params)
    }

    /// Searches the caller's grid, leaving visited and path markings on it.
    #[must_use]
    pub fn shared(grid: &'a mut Grid, strategy: Strategy, params: AStarParams) -> Self {
        Self::new(GridHandle::Shared(grid), strategy, params)
    }

    /// Overrides the marker painted by [`reconstruct_path`](Self::reconstruct_path).
    ///
    /// Defaults to the search's own strategy.
    #[must_use]
    pub fn with_path_kind(mut self, kind: Strategy) -> Self {
        self.path_kind = kind;
        self
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.core.strategy
    }

    #[must_use]
    pub fn params(&self) -> AStarParams {
        self.core.params
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn steps(&self) -> usize {
        self.core.steps
    }

    #[must_use]
    pub fn visited(&self) -> usize {
        self.visited
    }

    #[must_use]
    pub fn parents(&self) -> &ParentMap {
        &self.core.parents
    }

    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.core.frontier.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.core.outcome.is_some()
    }

    /// Performs one step: pop one node and, unless it is the goal, expand it.
    ///
    /// Once the search has finished, further calls do no work and repeat the
    /// final outcome.
    pub fn advance(&mut self) -> Progress {
        let was_finished = self.is_finished();
        let (progress, touched) = self.core.step(&self.grid);
        for coord in touched {
            if self.grid.mark_visited(coord) {
                self.visited += 1;
            }
        }
        if !was_finished && progress != Progress::Continue {
            tracing::debug!(
                strategy = %self.core.strategy,
                steps = self.core.steps,
                visited = self.visited,
                success = progress.is_success(),
                "search finished"
            );
        }
        progress
    }

    /// Advances until the search finishes and returns the final outcome.
    pub fn run_to_end(&mut self) -> Progress {
        loop {
            let progress = self.advance();
            if progress != Progress::Continue {
                return progress;
            }
        }
    }

    #[must_use]
    pub fn report(&self) -> SearchReport {
        SearchReport {
            strategy: self.core.strategy,
            success: self.core.outcome == Some(true),
            steps: self.core.steps,
            visited: self.visited,
            start: self.core.start,
            goal: self.core.goal,
            parents: self.core.parents.clone(),
        }
    }

    /// Reconstructs the path found so far and paints it on the search's grid.
    ///
    /// The path excludes the start and ends at the goal. An empty path means
    /// no usable path, regardless of what [`advance`](Self::advance) reported.
    pub fn reconstruct_path(&mut self) -> Vec<Coord> {
        let (Some(start), Some(goal)) = (self.core.start, self.core.goal) else {
            return vec![];
        };
        let path = path::reconstruct(&self.core.parents, start, goal);
        path::paint(&mut self.grid, &path, self.path_kind);
        path
    }
}

fn drain_fast(core: &mut Core, grid: &Grid) -> Progress {
    loop {
        let (progress, _) = core.step(grid);
        if progress != Progress::Continue {
            return progress;
        }
    }
}

/// Runs A* to completion on a shared grid without marking it.
///
/// This is the non-suspending mode: `visited` in the report counts every
/// popped node and therefore equals `steps`.
#[must_use]
pub fn fast_astar(grid: &Grid, params: AStarParams) -> SearchReport {
    let mut core = Core::new(grid, Strategy::AStar, params);
    let progress = drain_fast(&mut core, grid);
    SearchReport {
        strategy: Strategy::AStar,
        success: progress.is_success(),
        steps: core.steps,
        visited: core.steps,
        start: core.start,
        goal: core.goal,
        parents: core.parents,
    }
}
