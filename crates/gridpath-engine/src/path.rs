//! Path reconstruction from parent pointers.
//!
//! Every search records, for each discovered node, the node it was discovered
//! from. Walking those pointers backwards from the goal yields the path. The
//! walk is failure-safe: a missing link or a cycle produces an empty path,
//! which callers must treat as "no usable path" whatever the search reported.

use std::collections::HashMap;

use crate::{
    grid::{Cell, Coord, Grid},
    search::Strategy,
};

/// Child → parent links recorded while a search discovers nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentMap(HashMap<Coord, Coord>);

impl ParentMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `parent` as the predecessor of `child`, replacing any previous link.
    pub fn insert(&mut self, child: Coord, parent: Coord) {
        self.0.insert(child, parent);
    }

    #[must_use]
    pub fn get(&self, child: Coord) -> Option<Coord> {
        self.0.get(&child).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.0.iter().map(|(&child, &parent)| (child, parent))
    }
}

impl FromIterator<(Coord, Coord)> for ParentMap {
    fn from_iter<T: IntoIterator<Item = (Coord, Coord)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Rebuilds the path from `start` to `goal`.
///
/// The result excludes `start` and ends with `goal`. It is empty when the
/// chain of parents is broken before reaching `start`, when it loops, or when
/// `start == goal`.
///
/// ```
/// use gridpath_engine::{Coord, ParentMap, path};
///
/// let parents: ParentMap = [
///     (Coord::new(0, 1), Coord::new(0, 0)),
///     (Coord::new(1, 1), Coord::new(0, 1)),
/// ]
/// .into_iter()
/// .collect();
///
/// let route = path::reconstruct(&parents, Coord::new(0, 0), Coord::new(1, 1));
/// assert_eq!(route, [Coord::new(0, 1), Coord::new(1, 1)]);
/// ```
#[must_use]
pub fn reconstruct(parents: &ParentMap, start: Coord, goal: Coord) -> Vec<Coord> {
    let mut path = vec![];
    let mut current = goal;
    while current != start {
        // a simple path can't be longer than the number of links
        if path.len() > parents.len() {
            return vec![];
        }
        path.push(current);
        let Some(parent) = parents.get(current) else {
            return vec![];
        };
        current = parent;
    }
    path.reverse();
    path
}

/// Paints `path` onto `grid` with the path marker of `kind`.
///
/// Only `Free` and `Visited` cells are painted, so `Start`, `Goal` and
/// obstacles stay recognizable.
pub fn paint(grid: &mut Grid, path: &[Coord], kind: Strategy) {
    for &coord in path {
        if matches!(grid.get(coord), Some(Cell::Free | Cell::Visited)) {
            grid.set(coord, Cell::Path(kind));
        }
    }
}
