//! Grid model and step-resumable path searches.
//!
//! This crate provides the search side of gridpath:
//!
//! - [`Grid`] - Fixed-shape matrix of semantic [`Cell`] states
//! - [`Search`] - BFS, DFS, Dijkstra and A* as explicit resumable state objects
//! - [`fast_astar`] - Non-suspending A* used for bulk fitness evaluation
//! - [`path`] - Failure-safe path reconstruction from parent links
//!
//! # Search Flow
//!
//! 1. Build or parse a [`Grid`] holding one `Start` and one `Goal` cell
//! 2. Create a [`Search`] over a private copy or over the caller's grid
//! 3. Call [`Search::advance`] until it stops returning [`Progress::Continue`]
//! 4. Read back the [`SearchReport`] and reconstruct the path
//!
//! An empty reconstructed path is the authoritative "no path" signal.
//!
//! # Example
//!
//! ```
//! use gridpath_engine::{AStarParams, Grid, Progress, Search, Strategy};
//!
//! let grid: Grid = "S.#\n..#\n#.G".parse().unwrap();
//! let mut search = Search::owned(grid, Strategy::AStar, AStarParams::default());
//!
//! assert_eq!(search.run_to_end(), Progress::Success);
//! assert_eq!(search.reconstruct_path().len(), 4);
//! ```

pub use self::{grid::*, path::ParentMap, search::*};

mod frontier;
mod grid;
pub mod path;
mod search;
