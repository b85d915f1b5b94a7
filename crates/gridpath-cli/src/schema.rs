use chrono::{DateTime, Utc};
use gridpath_engine::{AStarParams, Coord, SearchReport, Strategy};
use gridpath_training::{config::OptimizerConfig, genetic::Individual};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchSummary {
    pub strategy: Strategy,
    pub params: AStarParams,
    pub success: bool,
    pub steps: usize,
    pub visited: usize,
    pub path: Vec<Coord>,
    /// Final grid, one string per row.
    pub grid: Vec<String>,
}

impl SearchSummary {
    pub fn new(report: &SearchReport, params: AStarParams, path: Vec<Coord>, grid: &str) -> Self {
        Self {
            strategy: report.strategy,
            params,
            success: report.success,
            steps: report.steps,
            visited: report.visited,
            path,
            grid: grid.lines().map(str::to_owned).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TuningResult {
    pub trained_at: DateTime<Utc>,
    pub population_size: usize,
    pub generation_count: usize,
    pub mutation_rate: f64,
    pub seed: Option<u64>,
    /// Best individual of any generation.
    pub best: TunedParams,
    /// Ranked best of every generation, oldest first.
    pub generation_bests: Vec<TunedParams>,
    /// Best individual seen so far after every generation, oldest first.
    pub history: Vec<TunedParams>,
}

impl TuningResult {
    pub fn new(
        config: &OptimizerConfig,
        best: &Individual,
        generation_bests: &[Individual],
        history: &[Individual],
    ) -> Self {
        Self {
            trained_at: Utc::now(),
            population_size: config.population_size,
            generation_count: config.generation_count,
            mutation_rate: config.mutation_rate,
            seed: config.seed,
            best: TunedParams::from(best),
            generation_bests: generation_bests.iter().map(TunedParams::from).collect(),
            history: history.iter().map(TunedParams::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TunedParams {
    pub heuristic_weight: f64,
    pub movement_cost: f64,
    /// `None` when no path was found.
    pub fitness: Option<f64>,
}

impl From<&Individual> for TunedParams {
    fn from(ind: &Individual) -> Self {
        Self {
            heuristic_weight: ind.heuristic_weight(),
            movement_cost: ind.movement_cost(),
            fitness: ind.fitness().is_finite().then_some(ind.fitness()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unevaluated_fitness_is_none() {
        let ind = Individual::new(AStarParams::default());
        let tuned = TunedParams::from(&ind);
        assert_eq!(tuned.fitness, None);
        assert_eq!(tuned.heuristic_weight, 1.0);

        let json = serde_json::to_string(&tuned).unwrap();
        assert!(json.contains("\"fitness\":null"));
    }
}
