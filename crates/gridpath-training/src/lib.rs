//! Generational tuning of A* search parameters.
//!
//! This crate tunes the two continuous parameters of the A* strategy from
//! `gridpath-engine` (heuristic weight and per-step movement cost) with a
//! simple genetic algorithm that uses path quality as fitness.
//!
//! # How Tuning Works
//!
//! 1. **Population** - Sample individuals with random parameters
//! 2. **Evaluation** - Run A* on the grid with each individual's parameters
//! 3. **Fitness** - Score the run; lower is better, `+∞` means no path
//! 4. **Selection** - Keep the top half of the ranked population
//! 5. **Reproduction** - Recombine pairs of distinct survivors, then mutate
//! 6. **Repeat** - For a fixed number of generations
//!
//! # Architecture
//!
//! ```text
//! Optimizer (optimizer)
//!     ↓ evolves
//! Population of Individuals (genetic)
//!     ↓ bred with
//! Parameter operators (params)
//!     ↓ scored by
//! Fitness functions (fitness)
//!     ↓ run
//! A* search (gridpath-engine)
//! ```
//!
//! # Example
//!
//! ```
//! use gridpath_engine::Grid;
//! use gridpath_training::{config::OptimizerConfig, optimizer::Optimizer};
//!
//! let grid: Grid = "S...\n.##.\n...G".parse().unwrap();
//! let config = OptimizerConfig::default().with_seed(1);
//! let mut optimizer = Optimizer::new(&grid, config)?;
//!
//! let best = optimizer.run().unwrap();
//! assert!(best.fitness().is_finite());
//! # Ok::<(), gridpath_training::config::ConfigError>(())
//! ```
//!
//! # Current Limitations
//!
//! - **No elitism**: the best individual of a generation only survives through
//!   its children, so the ranked best of a generation can regress;
//!   [`Optimizer::best`](optimizer::Optimizer::best) keeps the best ever seen
//! - **Single grid**: fitness is measured on one grid snapshot, so tuned
//!   parameters can overfit that layout
//! - **Mixed measures**: the observable loop ranks one fully evaluated
//!   individual against fast-evaluated ones, whose scores use different units

pub mod config;
pub mod fitness;
pub mod genetic;
pub mod optimizer;
pub mod params;
