use std::collections::HashSet;

use gridpath_engine::{
    AStarParams, Cell, Coord, Grid, Progress, Search, SearchReport, Strategy, fast_astar,
};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

fn random_grid(seed: u64, rows: usize, cols: usize) -> Grid {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut grid = Grid::new(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            if rng.random_bool(0.25) {
                grid.add_obstacle(Coord::new(row, col));
            }
        }
    }
    grid.set_start(Coord::new(0, 0));
    grid.set_goal(Coord::new(rows - 1, cols - 1));
    grid
}

/// Hop distance from start to goal by repeated relaxation over all cells.
fn brute_force_distance(grid: &Grid) -> Option<usize> {
    let start = grid.start()?;
    let goal = grid.goal()?;
    let mut dist = vec![vec![usize::MAX; grid.cols()]; grid.rows()];
    dist[start.row][start.col] = 0;
    let mut changed = true;
    while changed {
        changed = false;
        for (coord, cell) in grid.iter() {
            if cell == Cell::Obstacle || dist[coord.row][coord.col] == usize::MAX {
                continue;
            }
            let next = dist[coord.row][coord.col] + 1;
            for n in grid.neighbors(coord) {
                if next < dist[n.row][n.col] {
                    dist[n.row][n.col] = next;
                    changed = true;
                }
            }
        }
    }
    let d = dist[goal.row][goal.col];
    (d != usize::MAX).then_some(d)
}

fn run(grid: &Grid, strategy: Strategy, params: AStarParams) -> SearchReport {
    let mut search = Search::owned(grid.clone(), strategy, params);
    search.run_to_end();
    search.report()
}

fn assert_valid_path(grid: &Grid, path: &[Coord]) {
    let start = grid.start().unwrap();
    let goal = grid.goal().unwrap();

    assert!(start.is_adjacent(path[0]), "path must start next to {start}");
    assert_eq!(*path.last().unwrap(), goal);
    let unique = path.iter().collect::<HashSet<_>>();
    assert_eq!(unique.len(), path.len(), "path has repeated cells: {path:?}");
    for pair in path.windows(2) {
        assert!(pair[0].is_adjacent(pair[1]), "{} -> {}", pair[0], pair[1]);
    }
    for &coord in path {
        assert_ne!(grid.get(coord), Some(Cell::Obstacle));
    }
}

#[test]
fn test_bfs_is_shortest_on_random_grids() {
    for seed in 0..60 {
        let grid = random_grid(seed, 6, 7);
        let expected = brute_force_distance(&grid);
        let report = run(&grid, Strategy::BreadthFirst, AStarParams::default());
        let path = report.path();

        match expected {
            Some(distance) => {
                assert!(report.success, "seed {seed}");
                assert_eq!(path.len(), distance, "seed {seed}\n{grid}");
                assert_valid_path(&grid, &path);
            }
            None => {
                assert!(!report.success, "seed {seed}");
                assert!(path.is_empty(), "seed {seed}");
            }
        }
    }
}

#[test]
fn test_dijkstra_matches_bfs() {
    for seed in 100..160 {
        let grid = random_grid(seed, 7, 6);
        let bfs = run(&grid, Strategy::BreadthFirst, AStarParams::default()).path();
        let dijkstra = run(&grid, Strategy::Dijkstra, AStarParams::default()).path();
        assert_eq!(dijkstra.len(), bfs.len(), "seed {seed}\n{grid}");
    }
}

#[test]
fn test_zero_weight_astar_matches_dijkstra() {
    for seed in 200..240 {
        let grid = random_grid(seed, 6, 6);
        let dijkstra = run(&grid, Strategy::Dijkstra, AStarParams::default()).path();
        for movement_cost in [0.5, 1.0, 1.7] {
            let params = AStarParams {
                heuristic_weight: 0.0,
                movement_cost,
            };
            let astar = run(&grid, Strategy::AStar, params).path();
            assert_eq!(astar.len(), dijkstra.len(), "seed {seed}, cost {movement_cost}");
        }
    }
}

#[test]
fn test_every_strategy_yields_valid_paths() {
    let params = AStarParams {
        heuristic_weight: 2.5,
        movement_cost: 0.9,
    };
    for seed in 300..340 {
        let grid = random_grid(seed, 8, 8);
        for strategy in Strategy::ALL {
            let report = run(&grid, strategy, params);
            let path = report.path();
            if !path.is_empty() {
                assert_valid_path(&grid, &path);
            }
            assert_eq!(path.is_empty(), !report.success, "{strategy}, seed {seed}");
        }
    }
}

#[test]
fn test_reconstruction_is_idempotent() {
    let grid = random_grid(7, 8, 8);
    for strategy in Strategy::ALL {
        let report = run(&grid, strategy, AStarParams::default());
        assert_eq!(report.path(), report.path());

        let mut search = Search::owned(grid.clone(), strategy, AStarParams::default());
        search.run_to_end();
        let first = search.reconstruct_path();
        let second = search.reconstruct_path();
        assert_eq!(first, second);
    }
}

#[test]
fn test_open_5x5_bfs() {
    let mut grid = Grid::new(5, 5);
    grid.set_start(Coord::new(0, 0));
    grid.set_goal(Coord::new(4, 4));

    let mut search = Search::shared(&mut grid, Strategy::BreadthFirst, AStarParams::default());
    assert_eq!(search.run_to_end(), Progress::Success);
    assert!(search.visited() <= 24);
    let path = search.reconstruct_path();

    // 8 moves; with the start cell the route covers 9 cells.
    assert_eq!(path.len() + 1, 9);
    assert_eq!(grid.count(Cell::Path(Strategy::BreadthFirst)), 7);
    assert_eq!(grid.count(Cell::Start), 1);
    assert_eq!(grid.count(Cell::Goal), 1);
}

#[test]
fn test_wall_with_single_gap() {
    let grid: Grid = "
        S....
        .....
        ###.#
        .....
        ....G
    "
    .parse()
    .unwrap();
    let gap = Coord::new(2, 3);

    for strategy in Strategy::ALL {
        let mut search = Search::owned(grid.clone(), strategy, AStarParams::default());
        assert_eq!(search.run_to_end(), Progress::Success, "{strategy}");
        let path = search.reconstruct_path();
        assert!(path.contains(&gap), "{strategy} path {path:?}");
        assert_valid_path(&grid, &path);
    }
}

#[test]
fn test_missing_goal_fails_for_every_strategy() {
    let mut grid = Grid::new(5, 5);
    grid.set_start(Coord::new(0, 0));

    for strategy in Strategy::ALL {
        let mut search = Search::owned(grid.clone(), strategy, AStarParams::default());
        assert_eq!(search.advance(), Progress::Failure);
        assert_eq!(search.run_to_end(), Progress::Failure);
        let report = search.report();
        assert!(!report.success);
        assert_eq!(report.steps, 0);
    }

    let report = fast_astar(&grid, AStarParams::default());
    assert!(!report.success);
    assert_eq!(report.steps, 0);
    assert_eq!(report.visited, 0);
}

#[test]
fn test_shared_search_leaves_markings() {
    let mut grid: Grid = "S...\n.##.\n...G".parse().unwrap();
    {
        let mut search = Search::shared(&mut grid, Strategy::Dijkstra, AStarParams::default());
        search.run_to_end();
        search.reconstruct_path();
    }
    assert!(grid.count(Cell::Path(Strategy::Dijkstra)) > 0);

    grid.clear_markings();
    assert_eq!(grid.to_string(), "S...\n.##.\n...G\n");
}
