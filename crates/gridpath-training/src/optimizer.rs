//! Generational optimizer for A* parameters.
//!
//! The [`Optimizer`] owns a snapshot of the grid, the population and a
//! seedable random source. It can be driven in two ways:
//!
//! - [`Optimizer::run`] evaluates every individual with the full fitness
//!   measure each generation and returns the final best individual.
//! - [`Optimizer::next_event`] (or iterating the optimizer) advances one
//!   observable event at a time. Each generation, individual 0 is scored with
//!   the full measure and reported so a caller can animate its A* run; the rest
//!   are scored with the fast measure; then the generation best is reported.
//!   A single [`OptimizerEvent::Finished`] follows the last generation.
//!
//! Stopping early is simply not asking for more events.
//!
//! Breeding has no elite slot, so the ranked best of a generation can be worse
//! than the one before it. The optimizer's answer, [`Optimizer::best`], is the
//! lowest-fitness individual seen in any generation and never gets worse.
//!
//! # Example
//!
//! ```
//! use gridpath_engine::Grid;
//! use gridpath_training::{
//!     config::OptimizerConfig,
//!     optimizer::{Optimizer, OptimizerEvent},
//! };
//!
//! let grid: Grid = "S....\n.###.\n....G".parse().unwrap();
//! let config = OptimizerConfig::default()
//!     .with_population_size(6)
//!     .with_generation_count(3)
//!     .with_seed(7);
//! let mut optimizer = Optimizer::new(&grid, config).unwrap();
//!
//! let events = optimizer.by_ref().collect::<Vec<_>>();
//! assert_eq!(events.len(), 3 * 2 + 1);
//! assert!(matches!(events.last(), Some(OptimizerEvent::Finished)));
//! assert!(optimizer.best().is_some());
//! ```

use gridpath_engine::Grid;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::{
    config::{ConfigError, OptimizerConfig},
    genetic::{Individual, Population},
};

/// One observable event of the optimizer loop.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum OptimizerEvent {
    /// An individual was scored with the full measure.
    IndividualEvaluated {
        generation: usize,
        index: usize,
        individual: Individual,
    },
    /// The generation was ranked.
    GenerationBest {
        generation: usize,
        /// Ranked best of this generation.
        individual: Individual,
        /// Best individual seen so far, this generation included.
        best: Individual,
    },
    /// All generations are done.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Next: breed (unless first generation) and fully evaluate individual 0.
    Lead(usize),
    /// Next: fast-evaluate the remaining individuals and rank.
    Rest(usize),
    /// Next: emit the final event.
    Finished,
    Done,
}

/// Tunes [`AStarParams`](gridpath_engine::AStarParams) on one grid.
#[derive(Debug, Clone)]
pub struct Optimizer {
    grid: Grid,
    config: OptimizerConfig,
    rng: Pcg32,
    population: Population,
    phase: Phase,
    generation_bests: Vec<Individual>,
    history: Vec<Individual>,
}

impl Optimizer {
    /// Validates `config` and creates the initial random population.
    ///
    /// The grid is copied; later changes to the caller's grid are not seen.
    pub fn new(grid: &Grid, config: OptimizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        let population = Population::random(config.population_size, &mut rng);
        Ok(Self {
            grid: grid.clone(),
            config,
            rng,
            population,
            phase: Phase::Lead(0),
            generation_bests: vec![],
            history: vec![],
        })
    }

    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of generations fully evaluated so far.
    #[must_use]
    pub fn completed_generations(&self) -> usize {
        self.history.len()
    }

    /// Best individual seen so far after each completed generation, oldest first.
    ///
    /// Fitness along the history never increases.
    #[must_use]
    pub fn history(&self) -> &[Individual] {
        &self.history
    }

    /// Ranked best of each completed generation, oldest first.
    #[must_use]
    pub fn generation_bests(&self) -> &[Individual] {
        &self.generation_bests
    }

    /// Lowest-fitness individual seen in any generation so far.
    ///
    /// After the last generation this is the optimizer's answer.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.history.last()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished | Phase::Done)
    }

    /// Advances to the next observable event.
    ///
    /// Returns `None` once [`OptimizerEvent::Finished`] has been delivered.
    pub fn next_event(&mut self) -> Option<OptimizerEvent> {
        match self.phase {
            Phase::Lead(generation) => {
                self.prepare_generation(generation);
                let lead = &mut self.population.individuals_mut()[0];
                lead.evaluate_full(&self.grid);
                let individual = lead.clone();
                self.phase = Phase::Rest(generation);
                Some(OptimizerEvent::IndividualEvaluated {
                    generation,
                    index: 0,
                    individual,
                })
            }
            Phase::Rest(generation) => {
                self.evaluate_rest_fast();
                let individual = self.finish_generation(generation);
                let best = self.history.last().cloned().unwrap_or_else(|| individual.clone());
                Some(OptimizerEvent::GenerationBest {
                    generation,
                    individual,
                    best,
                })
            }
            Phase::Finished => {
                self.phase = Phase::Done;
                Some(OptimizerEvent::Finished)
            }
            Phase::Done => None,
        }
    }

    /// Runs all remaining generations with the full fitness measure.
    ///
    /// A generation already started through [`next_event`](Self::next_event)
    /// is completed the way it began. Returns the best individual seen.
    pub fn run(&mut self) -> Option<&Individual> {
        loop {
            match self.phase {
                Phase::Lead(generation) => {
                    self.prepare_generation(generation);
                    self.population.evaluate_full(&self.grid);
                    self.finish_generation(generation);
                }
                Phase::Rest(generation) => {
                    self.evaluate_rest_fast();
                    self.finish_generation(generation);
                }
                Phase::Finished | Phase::Done => break,
            }
        }
        self.phase = Phase::Done;
        self.best()
    }

    fn prepare_generation(&mut self, generation: usize) {
        if generation > 0 {
            self.population = self
                .population
                .breed(self.config.mutation_rate, &mut self.rng);
        }
    }

    fn evaluate_rest_fast(&mut self) {
        for ind in self.population.individuals_mut().iter_mut().skip(1) {
            let fitness = ind.evaluate_fast(&self.grid);
            tracing::debug!(
                heuristic_weight = ind.heuristic_weight(),
                movement_cost = ind.movement_cost(),
                fitness,
                "individual evaluated (fast)"
            );
        }
    }

    /// Ranks the evaluated population, records its best and moves to the next phase.
    ///
    /// Returns the ranked best of this generation.
    fn finish_generation(&mut self, generation: usize) -> Individual {
        self.population.rank();
        let best = self.population.individuals()[0].clone();
        tracing::info!(
            generation,
            heuristic_weight = best.heuristic_weight(),
            movement_cost = best.movement_cost(),
            fitness = best.fitness(),
            "generation best"
        );

        let best_so_far = match self.history.last() {
            Some(previous) if previous.fitness() <= best.fitness() => previous.clone(),
            _ => best.clone(),
        };
        self.history.push(best_so_far);
        self.generation_bests.push(best.clone());

        self.phase = if generation + 1 < self.config.generation_count {
            Phase::Lead(generation + 1)
        } else {
            Phase::Finished
        };
        best
    }
}

impl Iterator for Optimizer {
    type Item = OptimizerEvent;

    fn next(&mut self) -> Option<OptimizerEvent> {
        self.next_event()
    }
}
