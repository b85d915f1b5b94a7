//! Genetic operators on A* parameter vectors.
//!
//! An [`AStarParams`] value is the genome: two real-valued genes,
//! `heuristic_weight` and `movement_cost`. These functions are used by
//! [`Population`](crate::genetic::Population) to implement initialization,
//! crossover and mutation.
//!
//! - **Initialization**: [`random`] samples each gene uniformly from its
//!   initial range
//! - **Crossover**: [`crossover`] copies each gene verbatim from one of the
//!   two parents, chosen independently with equal probability
//! - **Mutation**: [`mutate`] perturbs each gene independently with
//!   probability `rate` by a bounded uniform offset, never going below
//!   [`MIN_GENE`]

use std::ops::RangeInclusive;

use gridpath_engine::AStarParams;
use rand::Rng;

/// Range initial heuristic weights are sampled from.
pub const INITIAL_HEURISTIC_WEIGHT: RangeInclusive<f64> = 0.5..=3.0;
/// Range initial movement costs are sampled from.
pub const INITIAL_MOVEMENT_COST: RangeInclusive<f64> = 0.8..=1.5;

/// Largest offset a mutation adds to or removes from the heuristic weight.
pub const HEURISTIC_WEIGHT_STEP: f64 = 0.3;
/// Largest offset a mutation adds to or removes from the movement cost.
pub const MOVEMENT_COST_STEP: f64 = 0.2;

/// Floor applied to both genes after mutation.
pub const MIN_GENE: f64 = 0.1;

/// Samples a parameter vector from the initial ranges.
///
/// ```
/// use gridpath_training::params;
///
/// let p = params::random(&mut rand::rng());
/// assert!(params::INITIAL_HEURISTIC_WEIGHT.contains(&p.heuristic_weight));
/// assert!(params::INITIAL_MOVEMENT_COST.contains(&p.movement_cost));
/// ```
pub fn random<R>(rng: &mut R) -> AStarParams
where
    R: Rng + ?Sized,
{
    AStarParams {
        heuristic_weight: rng.random_range(INITIAL_HEURISTIC_WEIGHT),
        movement_cost: rng.random_range(INITIAL_MOVEMENT_COST),
    }
}

/// Builds a child by picking every gene from `p1` or `p2` with equal probability.
pub fn crossover<R>(p1: &AStarParams, p2: &AStarParams, rng: &mut R) -> AStarParams
where
    R: Rng + ?Sized,
{
    AStarParams {
        heuristic_weight: if rng.random_bool(0.5) {
            p1.heuristic_weight
        } else {
            p2.heuristic_weight
        },
        movement_cost: if rng.random_bool(0.5) {
            p1.movement_cost
        } else {
            p2.movement_cost
        },
    }
}

/// Mutates `params` in place and returns whether any gene changed.
///
/// Each gene is perturbed independently with probability `rate`:
///
/// - `heuristic_weight += U(-0.3, 0.3)`
/// - `movement_cost += U(-0.2, 0.2)`
///
/// and clamped from below to [`MIN_GENE`].
pub fn mutate<R>(params: &mut AStarParams, rate: f64, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    let mut mutated = false;
    if rng.random_bool(rate) {
        params.heuristic_weight = perturb(params.heuristic_weight, HEURISTIC_WEIGHT_STEP, rng);
        mutated = true;
    }
    if rng.random_bool(rate) {
        params.movement_cost = perturb(params.movement_cost, MOVEMENT_COST_STEP, rng);
        mutated = true;
    }
    mutated
}

fn perturb<R>(gene: f64, step: f64, rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    f64::max(MIN_GENE, gene + rng.random_range(-step..=step))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const P1: AStarParams = AStarParams {
        heuristic_weight: 1.0,
        movement_cost: 2.0,
    };
    const P2: AStarParams = AStarParams {
        heuristic_weight: 3.0,
        movement_cost: 4.0,
    };

    #[test]
    fn test_crossover_copies_genes_verbatim() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen_mixed = false;
        for _ in 0..200 {
            let child = crossover(&P1, &P2, &mut rng);
            assert!([1.0, 3.0].contains(&child.heuristic_weight));
            assert!([2.0, 4.0].contains(&child.movement_cost));
            if (child.heuristic_weight == 1.0) != (child.movement_cost == 2.0) {
                seen_mixed = true;
            }
        }
        assert!(seen_mixed, "genes should be chosen independently");
    }

    #[test]
    fn test_mutate_with_zero_rate_is_noop() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut params = P1;
        for _ in 0..100 {
            assert!(!mutate(&mut params, 0.0, &mut rng));
        }
        assert_eq!(params, P1);
    }

    #[test]
    fn test_mutate_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let mut params = P2;
            assert!(mutate(&mut params, 1.0, &mut rng));
            let dw = (params.heuristic_weight - P2.heuristic_weight).abs();
            let dc = (params.movement_cost - P2.movement_cost).abs();
            assert!(dw <= HEURISTIC_WEIGHT_STEP + 1e-9, "{dw}");
            assert!(dc <= MOVEMENT_COST_STEP + 1e-9, "{dc}");
        }
    }

    #[test]
    fn test_mutate_respects_floor() {
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..500 {
            let mut params = AStarParams {
                heuristic_weight: MIN_GENE,
                movement_cost: MIN_GENE,
            };
            mutate(&mut params, 1.0, &mut rng);
            assert!(params.heuristic_weight >= MIN_GENE);
            assert!(params.movement_cost >= MIN_GENE);
        }
    }

    #[test]
    fn test_random_within_initial_ranges() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            let params = random(&mut rng);
            assert!(INITIAL_HEURISTIC_WEIGHT.contains(&params.heuristic_weight));
            assert!(INITIAL_MOVEMENT_COST.contains(&params.movement_cost));
        }
    }
}
