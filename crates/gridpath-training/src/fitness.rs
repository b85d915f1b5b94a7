//! Fitness functions scoring one A* run. Lower is better.
//!
//! Two measures exist and are deliberately not unified:
//!
//! - [`evaluate_full`] replays the suspending A* on a private copy of the grid
//!   and scores `path_length + 0.3 × visited`, or `+∞` when no path exists.
//! - [`evaluate_fast`] runs the non-suspending A* on the shared grid and scores
//!   `steps + visited`.
//!
//! The observable optimizer loop ranks individuals scored by both within the
//! same generation.

use gridpath_engine::{AStarParams, Grid, Search, Strategy, fast_astar};

/// Weight of the visited count in [`evaluate_full`].
pub const VISITED_PENALTY: f64 = 0.3;

/// Scores `params` with a full A* run on a private copy of `grid`.
///
/// Returns [`f64::INFINITY`] when the reconstructed path is empty.
#[must_use]
pub fn evaluate_full(grid: &Grid, params: AStarParams) -> f64 {
    let mut search = Search::owned(grid.clone(), Strategy::AStar, params);
    search.run_to_end();
    let path = search.reconstruct_path();
    if path.is_empty() {
        return f64::INFINITY;
    }
    to_f64(path.len()) + VISITED_PENALTY * to_f64(search.visited())
}

/// Scores `params` with the fast A* mode on `grid`.
///
/// The grid is only read.
#[must_use]
pub fn evaluate_fast(grid: &Grid, params: AStarParams) -> f64 {
    let report = fast_astar(grid, params);
    to_f64(report.steps + report.visited)
}

#[expect(clippy::cast_precision_loss)]
fn to_f64(value: usize) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_fitness_blends_length_and_visited() {
        let grid: Grid = "S..G".parse().unwrap();
        let fitness = evaluate_full(&grid, AStarParams::default());

        // path of 3 cells, 2 free cells visited
        assert!((fitness - 3.6).abs() < 1e-9, "{fitness}");
        assert_eq!(grid.to_string(), "S..G\n");
    }

    #[test]
    fn test_full_fitness_without_path_is_infinite() {
        let grid: Grid = "S.#G".parse().unwrap();
        assert_eq!(evaluate_full(&grid, AStarParams::default()), f64::INFINITY);

        let no_goal: Grid = "S...".parse().unwrap();
        assert_eq!(evaluate_full(&no_goal, AStarParams::default()), f64::INFINITY);
    }

    #[test]
    fn test_fast_fitness_counts_steps_twice() {
        let grid: Grid = "S..G".parse().unwrap();
        assert!((evaluate_fast(&grid, AStarParams::default()) - 8.0).abs() < 1e-9);

        // unreachable goal still yields a finite fast score
        let blocked: Grid = "S.#G".parse().unwrap();
        assert!((evaluate_fast(&blocked, AStarParams::default()) - 4.0).abs() < 1e-9);
    }
}
