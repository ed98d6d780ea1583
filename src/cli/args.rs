//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{draw::DrawArgs, stats::StatsArgs};

#[derive(StructOpt)]
#[structopt(
    name = "minimax-tree",
    about = "Record the tree an alpha-beta search explores and inspect it"
)]
pub enum MinimaxTree {
    #[structopt(
        name = "stats",
        about = "Search a tic-tac-toe position given as `--moves` (default: empty board) to the given `--depth` (default: 4) and print the engine's answer followed by the tree statistics. Choose the entry point with `--entry evaluate-moves|find-best-move` (default: find-best-move) and extend leaves with tactical moves using `--quiescence`."
    )]
    Stats(StatsArgs),
    #[structopt(
        name = "draw",
        about = "Search like `stats`, then export the tree below `--path` (default: the root) down to `--max-depth` plies (default: 10) as Graphviz DOT. The DOT source is printed unless `--output` is given, in which case it is rendered with `dot` in the given `--format` (default: svg)."
    )]
    Draw(DrawArgs),
}

impl crate::cli::commands::Command for MinimaxTree {
    fn execute(self) {
        match self {
            Self::Stats(cmd) => cmd.execute(),
            Self::Draw(cmd) => cmd.execute(),
        }
    }
}
