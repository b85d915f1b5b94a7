use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use gridpath_engine::{AStarParams, Progress, Search, Strategy};

use crate::{
    schema::SearchSummary,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum StrategyArg {
    Bfs,
    Dfs,
    Dijkstra,
    #[default]
    Astar,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Bfs => Strategy::BreadthFirst,
            StrategyArg::Dfs => Strategy::DepthFirst,
            StrategyArg::Dijkstra => Strategy::Dijkstra,
            StrategyArg::Astar => Strategy::AStar,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SearchArg {
    /// Grid file to search; reads stdin when omitted
    #[arg(long)]
    grid: Option<PathBuf>,
    /// Search strategy (bfs, dfs, dijkstra, astar)
    #[arg(long, default_value = "astar")]
    strategy: StrategyArg,
    /// Multiplier applied to the A* heuristic
    #[arg(long, default_value_t = 1.0)]
    heuristic_weight: f64,
    /// Per-step cost used by A*
    #[arg(long, default_value_t = 1.0)]
    movement_cost: f64,
    /// Print every step's frontier size to stderr
    #[arg(long)]
    trace: bool,
    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SearchArg) -> anyhow::Result<()> {
    let SearchArg {
        grid,
        strategy,
        heuristic_weight,
        movement_cost,
        trace,
        format,
        output,
    } = arg;

    let mut grid = util::read_grid(grid.as_deref())?;
    let strategy = Strategy::from(*strategy);
    let params = AStarParams {
        heuristic_weight: *heuristic_weight,
        movement_cost: *movement_cost,
    };

    let mut search = Search::shared(&mut grid, strategy, params);
    let progress = loop {
        let progress = search.advance();
        if *trace {
            eprintln!(
                "  step {:4}: frontier={} visited={}",
                search.steps(),
                search.frontier_len(),
                search.visited()
            );
        }
        if progress != Progress::Continue {
            break progress;
        }
    };
    let path = search.reconstruct_path();
    let report = search.report();

    eprintln!("{strategy} search: {progress:?}");
    eprintln!("  Steps:   {}", report.steps);
    eprintln!("  Visited: {}", report.visited);
    if path.is_empty() {
        eprintln!("  Path:    none");
    } else {
        eprintln!("  Path:    {} cells", path.len());
    }

    let rendered = grid.to_string();
    match format {
        OutputFormat::Text => {
            let mut output = Output::from_output_path(output.clone())?;
            let written = output
                .write_all(rendered.as_bytes())
                .and_then(|()| output.flush());
            written.with_context(|| format!("Failed to write grid to {}", output.display_path()))?;
        }
        OutputFormat::Json => {
            let summary = SearchSummary::new(&report, params, path, &rendered);
            Output::save_json(&summary, output.clone())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_arg_parses_case_insensitively() {
        assert_eq!("astar".parse::<StrategyArg>().unwrap(), StrategyArg::Astar);
        assert_eq!("BFS".parse::<StrategyArg>().unwrap(), StrategyArg::Bfs);
        assert_eq!(Strategy::from(StrategyArg::Dfs), Strategy::DepthFirst);
        assert!("greedy".parse::<StrategyArg>().is_err());
    }
}
