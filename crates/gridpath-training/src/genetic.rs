//! Individuals and populations of A* parameter vectors.
//!
//! # Generation Cycle
//!
//! 1. **Evaluate** - every individual receives a fitness (lower is better)
//! 2. **Rank** - stable ascending sort by fitness; index 0 is the generation best
//! 3. **Select** - the top `len / 2` individuals form the breeding pool
//! 4. **Recombine** - each child draws two distinct parents from the pool and
//!    copies every gene from one of them
//! 5. **Mutate** - each gene of each child is perturbed with probability
//!    `mutation_rate`
//! 6. **Replace** - the children become the next population
//!
//! There is no elitism: survivors only live on through their children.

use gridpath_engine::{AStarParams, Grid};
use rand::{Rng, seq::IndexedRandom as _};
use serde::Serialize;

use crate::{fitness, params};

/// A single candidate parameter vector and its fitness.
///
/// Fitness starts at `+∞` (not evaluated yet, worst possible) and is only
/// changed by evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Individual {
    params: AStarParams,
    fitness: f64,
    mutated: bool,
}

impl Individual {
    #[must_use]
    pub fn new(params: AStarParams) -> Self {
        Self {
            params,
            fitness: f64::INFINITY,
            mutated: false,
        }
    }

    /// Creates an individual with parameters sampled from the initial ranges.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(params::random(rng))
    }

    #[must_use]
    pub fn params(&self) -> AStarParams {
        self.params
    }

    #[must_use]
    pub fn heuristic_weight(&self) -> f64 {
        self.params.heuristic_weight
    }

    #[must_use]
    pub fn movement_cost(&self) -> f64 {
        self.params.movement_cost
    }

    /// Fitness score; lower is better, `+∞` when unevaluated or pathless.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Whether mutation changed this individual when it was bred.
    ///
    /// Only a display hint for callers.
    #[must_use]
    pub fn is_mutated(&self) -> bool {
        self.mutated
    }

    /// Scores this individual with a full A* run on a private grid copy.
    pub fn evaluate_full(&mut self, grid: &Grid) -> f64 {
        self.fitness = fitness::evaluate_full(grid, self.params);
        self.fitness
    }

    /// Scores this individual with the fast A* mode on the shared grid.
    pub fn evaluate_fast(&mut self, grid: &Grid) -> f64 {
        self.fitness = fitness::evaluate_fast(grid, self.params);
        self.fitness
    }
}

/// Summary of the finite fitness values of a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Number of individuals with a finite fitness.
    pub finite_count: usize,
}

/// An ordered collection of individuals.
///
/// The order is insertion order until [`rank`](Self::rank) sorts it; after
/// ranking, index 0 is the best individual.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `count` individuals with random parameters.
    pub fn random<R>(count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count).map(|_| Individual::random(rng)).collect();
        Self { individuals }
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub(crate) fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Returns the first individual, which is the best once the population is ranked.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// Scores every individual with a full A* run, then ranks the population.
    pub fn evaluate_full(&mut self, grid: &Grid) {
        for ind in &mut self.individuals {
            let fitness = ind.evaluate_full(grid);
            tracing::debug!(
                heuristic_weight = ind.heuristic_weight(),
                movement_cost = ind.movement_cost(),
                fitness,
                "individual evaluated"
            );
        }
        self.rank();
    }

    /// Stable-sorts individuals by ascending fitness.
    pub fn rank(&mut self) {
        self.individuals
            .sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
    }

    /// The breeding pool: the top half of the ranked population.
    #[must_use]
    pub fn survivors(&self) -> &[Individual] {
        &self.individuals[..self.individuals.len() / 2]
    }

    /// Breeds the next generation from the survivors of this (ranked) population.
    ///
    /// Every child gets two distinct parents drawn uniformly from the survivors,
    /// inherits each gene from one of them, and is then mutated. The new
    /// population has the same size as this one and is unevaluated.
    ///
    /// # Panics
    ///
    /// Panics if there are fewer than 2 survivors.
    pub fn breed<R>(&self, mutation_rate: f64, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        assert!(
            self.individuals
                .is_sorted_by(|a, b| a.fitness.total_cmp(&b.fitness).is_le()),
            "population must be ranked before breeding"
        );
        let survivors = self.survivors();
        assert!(survivors.len() >= 2, "breeding needs at least 2 survivors");

        let mut next_individuals = Vec::with_capacity(self.individuals.len());
        while next_individuals.len() < self.individuals.len() {
            let parents = survivors.choose_multiple(rng, 2).collect::<Vec<_>>();
            let mut child = params::crossover(&parents[0].params, &parents[1].params, rng);
            let mutated = params::mutate(&mut child, mutation_rate, rng);
            next_individuals.push(Individual {
                params: child,
                fitness: f64::INFINITY,
                mutated,
            });
        }
        Population {
            individuals: next_individuals,
        }
    }

    /// Statistics over the finite fitness values, `None` if there are none.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<FitnessStats> {
        let finite = self
            .individuals
            .iter()
            .map(Individual::fitness)
            .filter(|f| f.is_finite())
            .collect::<Vec<_>>();
        let min = finite.iter().copied().min_by(f64::total_cmp)?;
        let max = finite.iter().copied().max_by(f64::total_cmp)?;
        #[expect(clippy::cast_precision_loss)]
        let mean = finite.iter().sum::<f64>() / finite.len() as f64;
        Some(FitnessStats {
            min,
            max,
            mean,
            finite_count: finite.len(),
        })
    }
}
