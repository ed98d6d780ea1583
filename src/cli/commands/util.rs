//! Shared utilities for commands.

use std::fmt::Write as _;
use std::str::FromStr;

use minimax_tree::instrument::Instrumented;
use minimax_tree::minimax::{EngineConfig, MinimaxEngine};
use minimax_tree::search_tree::SearchTree;
use minimax_tree::tictactoe::{Board, Cell, TicTacToeEvaluator, TicTacToeMoveGenerator};
use structopt::StructOpt;

#[derive(Clone, Copy, Debug)]
pub enum EntryPoint {
    EvaluateMoves,
    FindBestMove,
}

impl FromStr for EntryPoint {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evaluate-moves" => Ok(EntryPoint::EvaluateMoves),
            "find-best-move" => Ok(EntryPoint::FindBestMove),
            _ => Err("invalid entry point; options are: evaluate-moves, find-best-move"),
        }
    }
}

#[derive(StructOpt)]
pub struct SearchArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    /// Moves played from the empty board, e.g. `b2,a1`.
    #[structopt(short, long, use_delimiter = true)]
    pub moves: Vec<Cell>,
    #[structopt(short, long, default_value = "find-best-move")]
    pub entry: EntryPoint,
    #[structopt(short, long)]
    pub quiescence: bool,
}

/// Runs the instrumented search and returns the annotated tree with a report of
/// what the engine answered.
pub(crate) fn run_search(args: &SearchArgs) -> Result<(SearchTree<Board>, String), String> {
    let mut board =
        Board::from_moves(&args.moves).map_err(|err| format!("invalid position: {}", err))?;
    let config = EngineConfig {
        depth: args.depth,
        quiescence: args.quiescence,
    };
    let engine = MinimaxEngine::new(config, TicTacToeMoveGenerator, TicTacToeEvaluator);

    let mut tree = SearchTree::new(&board);
    let mut search = Instrumented::new(&engine, engine.move_generator(), &mut tree);
    let mut report = format!("{}\n", board);

    match args.entry {
        EntryPoint::EvaluateMoves => {
            let scored = search
                .evaluate_moves(&mut board)
                .ok_or("engine does not evaluate moves")?
                .map_err(|err| format!("search failed: {}", err))?;
            for (cell, score) in scored {
                let _ = writeln!(report, "{}: {}", cell, score);
            }
        }
        EntryPoint::FindBestMove => {
            let best_move = search
                .find_best_move(&mut board)
                .ok_or("engine does not choose moves")?
                .map_err(|err| format!("search failed: {}", err))?;
            let _ = writeln!(report, "best move: {}", best_move);
        }
    }

    Ok((tree, report))
}
