use std::path::PathBuf;

use gridpath_engine::{Grid, Search, Strategy};
use gridpath_training::{
    config::OptimizerConfig,
    genetic::Individual,
    optimizer::{Optimizer, OptimizerEvent},
};

use crate::{
    schema::TuningResult,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum TuneMode {
    /// Replay the lead individual's A* run each generation; score the rest fast
    #[default]
    Observable,
    /// Score every individual with a full A* run
    Full,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TuneArg {
    /// Grid file to tune on; reads stdin when omitted
    #[arg(long)]
    grid: Option<PathBuf>,
    /// Individuals per generation
    #[arg(long, default_value_t = 10)]
    population: usize,
    /// Number of generations
    #[arg(long, default_value_t = 10)]
    generations: usize,
    /// Per-gene mutation probability
    #[arg(long, default_value_t = 0.2)]
    mutation_rate: f64,
    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Evaluation mode (observable, full)
    #[arg(long, default_value = "observable")]
    mode: TuneMode,
    /// Print the lead individual's painted grid every generation
    #[arg(long)]
    show_grid: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TuneArg) -> anyhow::Result<()> {
    let TuneArg {
        grid,
        population,
        generations,
        mutation_rate,
        seed,
        mode,
        show_grid,
        output,
    } = arg;

    let grid = util::read_grid(grid.as_deref())?;
    let mut config = OptimizerConfig::default()
        .with_population_size(*population)
        .with_generation_count(*generations)
        .with_mutation_rate(*mutation_rate);
    if let Some(seed) = seed {
        config = config.with_seed(*seed);
    }
    let mut optimizer = Optimizer::new(&grid, config)?;

    match mode {
        TuneMode::Observable => run_observable(&mut optimizer, &grid, *show_grid),
        TuneMode::Full => {
            optimizer.run();
            let bests = optimizer.history().iter();
            for (generation, (ranked, best)) in
                optimizer.generation_bests().iter().zip(bests).enumerate()
            {
                print_generation_best(generation, ranked, best);
            }
        }
    }

    let Some(best) = optimizer.best() else {
        anyhow::bail!("Optimizer finished without evaluating any generation");
    };
    eprintln!("Tuning completed.");
    eprintln!("  Best: {}", describe(best));

    let result = TuningResult::new(
        optimizer.config(),
        best,
        optimizer.generation_bests(),
        optimizer.history(),
    );
    Output::save_json(&result, output.clone())?;

    if let Some(path) = &output {
        eprintln!();
        eprintln!("Result saved successfully");
        eprintln!("  Path: {}", path.display());
        eprintln!("  Trained at: {}", result.trained_at);
    }
    Ok(())
}

fn run_observable(optimizer: &mut Optimizer, grid: &Grid, show_grid: bool) {
    while let Some(event) = optimizer.next_event() {
        match event {
            OptimizerEvent::IndividualEvaluated {
                generation,
                index,
                individual,
            } => {
                eprintln!("Generation #{generation}:");
                let kind = if individual.is_mutated() {
                    Strategy::Dijkstra
                } else {
                    Strategy::AStar
                };
                let mut search = Search::owned(grid.clone(), Strategy::AStar, individual.params())
                    .with_path_kind(kind);
                search.run_to_end();
                let path = search.reconstruct_path();
                eprintln!(
                    "  {index:2}: {} steps={} path={}",
                    describe(&individual),
                    search.steps(),
                    path.len()
                );
                if show_grid {
                    for line in search.grid().to_string().lines() {
                        eprintln!("      {line}");
                    }
                }
            }
            OptimizerEvent::GenerationBest {
                generation,
                individual,
                best,
            } => {
                print_generation_best(generation, &individual, &best);
                if let Some(stats) = optimizer.population().fitness_stats() {
                    eprintln!("  Fitness Stats ({} finite):", stats.finite_count);
                    eprintln!("    Min:  {:.3}", stats.min);
                    eprintln!("    Max:  {:.3}", stats.max);
                    eprintln!("    Mean: {:.3}", stats.mean);
                }
            }
            OptimizerEvent::Finished => {}
        }
    }
}

fn print_generation_best(generation: usize, ranked: &Individual, best: &Individual) {
    eprintln!("[Generation {generation}] {}", describe(ranked));
    if best != ranked {
        eprintln!("  (best so far: {})", describe(best));
    }
}

fn describe(ind: &Individual) -> String {
    format!(
        "w={:.3} cost={:.3} fitness={:.3}",
        ind.heuristic_weight(),
        ind.movement_cost(),
        ind.fitness()
    )
}
