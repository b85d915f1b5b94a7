use clap::{Parser, Subcommand};

use self::{search::SearchArg, tune::TuneArg};

mod search;
mod tune;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run one search strategy on a grid
    Search(#[clap(flatten)] SearchArg),
    /// Tune A* parameters using a genetic algorithm
    Tune(#[clap(flatten)] TuneArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Search(arg) => search::run(&arg)?,
        Mode::Tune(arg) => tune::run(&arg)?,
    }
    Ok(())
}
