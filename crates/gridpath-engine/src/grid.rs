use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::search::Strategy;

/// A `(row, col)` position on a [`Grid`].
///
/// A coordinate is only meaningful relative to a grid: it is valid when
/// `row < grid.rows()` and `col < grid.cols()`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns `true` if `other` is one of the four axis-aligned neighbors.
    #[must_use]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

/// Semantic state of a single grid cell.
///
/// `Visited` and `Path` are search markings: they are written by searches
/// running on a shared grid so the caller can observe progress, and are
/// wiped by [`Grid::clear_markings`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum Cell {
    #[default]
    Free,
    Obstacle,
    Start,
    Goal,
    Visited,
    /// Part of a reconstructed path, tagged with the strategy kind used as marker.
    Path(Strategy),
}

impl Cell {
    /// Returns `true` for cells written by a search (`Visited` or any path kind).
    #[must_use]
    pub fn is_marking(self) -> bool {
        matches!(self, Cell::Visited | Cell::Path(_))
    }

    /// Character used by the grid text format.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Cell::Free => '.',
            Cell::Obstacle => '#',
            Cell::Start => 'S',
            Cell::Goal => 'G',
            Cell::Visited => 'o',
            Cell::Path(Strategy::BreadthFirst) => 'b',
            Cell::Path(Strategy::DepthFirst) => 'd',
            Cell::Path(Strategy::Dijkstra) => 'j',
            Cell::Path(Strategy::AStar) => 'a',
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let cell = match symbol {
            '.' => Cell::Free,
            '#' => Cell::Obstacle,
            'S' => Cell::Start,
            'G' => Cell::Goal,
            'o' => Cell::Visited,
            'b' => Cell::Path(Strategy::BreadthFirst),
            'd' => Cell::Path(Strategy::DepthFirst),
            'j' => Cell::Path(Strategy::Dijkstra),
            'a' => Cell::Path(Strategy::AStar),
            _ => return None,
        };
        Some(cell)
    }
}

/// Error returned when parsing a [`Grid`] from its text format fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    #[display("grid text contains no rows")]
    Empty,
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("unknown cell symbol {symbol:?} at ({row}, {col})")]
    UnknownCell {
        row: usize,
        col: usize,
        symbol: char,
    },
}

/// Fixed-shape 2D matrix of [`Cell`]s.
///
/// The shape is decided at construction and never changes. All mutation goes
/// through bound-checked setters: writes outside the grid are ignored.
///
/// # Text format
///
/// Grids can be parsed from and displayed as text, one character per cell
/// (see [`Cell::symbol`]):
///
/// ```
/// use gridpath_engine::{Cell, Coord, Grid};
///
/// let grid: Grid = "S..\n.#.\n..G".parse().unwrap();
/// assert_eq!(grid.rows(), 3);
/// assert_eq!(grid.get(Coord::new(1, 1)), Some(Cell::Obstacle));
/// assert_eq!(grid.goal(), Some(Coord::new(2, 2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a `rows × cols` grid with every cell [`Cell::Free`].
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Free; rows * cols],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row * self.cols + coord.col)
    }

    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Writes `cell` at `coord`.
    ///
    /// Returns `false` and leaves the grid untouched if `coord` is out of bounds.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        let Some(i) = self.index(coord) else {
            return false;
        };
        self.cells[i] = cell;
        true
    }

    pub fn set_start(&mut self, coord: Coord) -> bool {
        self.set(coord, Cell::Start)
    }

    pub fn set_goal(&mut self, coord: Coord) -> bool {
        self.set(coord, Cell::Goal)
    }

    pub fn add_obstacle(&mut self, coord: Coord) -> bool {
        self.set(coord, Cell::Obstacle)
    }

    /// Returns the first coordinate holding `cell`, scanning row-major.
    ///
    /// When several cells share the state the top-most, then left-most, wins.
    #[must_use]
    pub fn find(&self, cell: Cell) -> Option<Coord> {
        self.iter().find(|&(_, c)| c == cell).map(|(coord, _)| coord)
    }

    #[must_use]
    pub fn start(&self) -> Option<Coord> {
        self.find(Cell::Start)
    }

    #[must_use]
    pub fn goal(&self) -> Option<Coord> {
        self.find(Cell::Goal)
    }

    /// Number of cells currently holding `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (Coord::new(i / self.cols, i % self.cols), cell))
    }

    /// Returns the in-bounds, non-obstacle axis-aligned neighbors of `coord`.
    ///
    /// Neighbors are always produced in north, south, west, east order. Search
    /// strategies rely on this order for deterministic expansion.
    #[must_use]
    pub fn neighbors(&self, coord: Coord) -> ArrayVec<Coord, 4> {
        let Coord { row, col } = coord;
        let candidates = [
            row.checked_sub(1).map(|r| Coord::new(r, col)),
            Some(Coord::new(row + 1, col)),
            col.checked_sub(1).map(|c| Coord::new(row, c)),
            Some(Coord::new(row, col + 1)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(|&c| self.get(c).is_some_and(|cell| cell != Cell::Obstacle))
            .collect()
    }

    /// Turns a `Free` cell into `Visited`.
    ///
    /// Returns `true` only when the transition happened; any other cell
    /// (including `Start` and `Goal`) is left as is.
    pub fn mark_visited(&mut self, coord: Coord) -> bool {
        match self.index(coord) {
            Some(i) if self.cells[i] == Cell::Free => {
                self.cells[i] = Cell::Visited;
                true
            }
            _ => false,
        }
    }

    /// Resets every `Visited` and path cell back to `Free`.
    pub fn clear_markings(&mut self) {
        for cell in &mut self.cells {
            if cell.is_marking() {
                *cell = Cell::Free;
            }
        }
    }

    /// Resets every cell to `Free`.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Free);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let Some(first) = lines.first() else {
            return Err(ParseGridError::Empty);
        };

        let cols = first.chars().count();
        let mut cells = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ParseGridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or(ParseGridError::UnknownCell { row, col, symbol })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: lines.len(),
            cols,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_free() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.count(Cell::Free), 12);
        assert_eq!(grid.start(), None);
        assert_eq!(grid.goal(), None);
    }

    #[test]
    fn test_set_out_of_bounds_is_noop() {
        let mut grid = Grid::new(2, 2);
        let before = grid.clone();

        assert!(!grid.set(Coord::new(2, 0), Cell::Obstacle));
        assert!(!grid.set(Coord::new(0, 2), Cell::Obstacle));
        assert!(!grid.set_start(Coord::new(usize::MAX, usize::MAX)));
        assert_eq!(grid, before);
        assert_eq!(grid.get(Coord::new(5, 5)), None);
    }

    #[test]
    fn test_find_is_row_major_first_match() {
        let mut grid = Grid::new(3, 3);
        grid.set_goal(Coord::new(2, 0));
        grid.set_goal(Coord::new(1, 2));
        grid.set_goal(Coord::new(1, 1));

        assert_eq!(grid.goal(), Some(Coord::new(1, 1)));
    }

    #[test]
    fn test_neighbors_order_and_filtering() {
        let grid: Grid = "...\n...\n...".parse().unwrap();
        let center = grid.neighbors(Coord::new(1, 1));
        assert_eq!(
            center.as_slice(),
            &[
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
            ]
        );

        let corner = grid.neighbors(Coord::new(0, 0));
        assert_eq!(corner.as_slice(), &[Coord::new(1, 0), Coord::new(0, 1)]);

        let grid: Grid = ".#.\n#..\n...".parse().unwrap();
        assert!(grid.neighbors(Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn test_mark_visited_only_from_free() {
        let mut grid: Grid = "S.G#".parse().unwrap();

        assert!(!grid.mark_visited(Coord::new(0, 0)));
        assert!(grid.mark_visited(Coord::new(0, 1)));
        assert!(!grid.mark_visited(Coord::new(0, 1)));
        assert!(!grid.mark_visited(Coord::new(0, 2)));
        assert!(!grid.mark_visited(Coord::new(0, 3)));
        assert!(!grid.mark_visited(Coord::new(0, 9)));

        assert_eq!(grid.to_string(), "SoG#\n");
    }

    #[test]
    fn test_clear_markings_keeps_layout() {
        let mut grid: Grid = "Sob#\naajG".parse().unwrap();
        grid.clear_markings();
        assert_eq!(grid.to_string(), "S..#\n...G\n");

        grid.clear();
        assert_eq!(grid.count(Cell::Free), 8);
    }

    #[test]
    fn test_parse_and_display() {
        let text = "S.#\n.oG\nbdj\na..\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
        assert_eq!(grid.get(Coord::new(2, 2)), Some(Cell::Path(Strategy::Dijkstra)));

        let indented: Grid = "\n   S.\n   .G\n\n".parse().unwrap();
        assert_eq!(indented.rows(), 2);
        assert_eq!(indented.cols(), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(ParseGridError::Empty));
        assert_eq!(
            "...\n..".parse::<Grid>(),
            Err(ParseGridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "..\n.x".parse::<Grid>(),
            Err(ParseGridError::UnknownCell {
                row: 1,
                col: 1,
                symbol: 'x'
            })
        );
    }

    #[test]
    fn test_coord_distance() {
        let a = Coord::new(1, 4);
        let b = Coord::new(3, 1);
        assert_eq!(a.manhattan(b), 5);
        assert!(Coord::new(2, 2).is_adjacent(Coord::new(2, 3)));
        assert!(!Coord::new(2, 2).is_adjacent(Coord::new(3, 3)));
        assert_eq!(a.to_string(), "(1, 4)");
    }

    #[test]
    fn test_serde_round_trip() {
        let coord = Coord::new(1, 4);
        let json = serde_json::to_value(coord).unwrap();
        assert_eq!(json, serde_json::json!({ "row": 1, "col": 4 }));
        assert_eq!(serde_json::from_value::<Coord>(json).unwrap(), coord);

        for cell in [Cell::Free, Cell::Obstacle, Cell::Path(Strategy::AStar)] {
            let text = serde_json::to_string(&cell).unwrap();
            assert_eq!(serde_json::from_str::<Cell>(&text).unwrap(), cell);
        }
        assert_eq!(
            serde_json::to_string(&Cell::Path(Strategy::AStar)).unwrap(),
            r#"{"Path":"AStar"}"#
        );
    }
}
