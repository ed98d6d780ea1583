//! Draw command - search a position and export the recorded tree as a graph.

use std::io;
use std::path::PathBuf;

use minimax_tree::render::ExportOptions;
use minimax_tree::tictactoe::Cell;
use structopt::StructOpt;

use super::util::{run_search, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct DrawArgs {
    #[structopt(flatten)]
    pub search: SearchArgs,
    /// Moves from the searched position to the first exported node.
    #[structopt(short, long, use_delimiter = true)]
    pub path: Vec<Cell>,
    #[structopt(long, default_value = "10")]
    pub max_depth: usize,
    /// File to render into; `.gv` and the format are appended.
    #[structopt(short, long, parse(from_os_str))]
    pub output: Option<PathBuf>,
    #[structopt(short, long, default_value = "svg")]
    pub format: String,
}

impl Command for DrawArgs {
    fn execute(self) {
        let (mut tree, report) = match run_search(&self.search) {
            Ok(result) => result,
            Err(err) => {
                eprintln!("{}", err);
                return;
            }
        };
        eprint!("{}", report);

        let options = ExportOptions {
            path: self.path,
            depth: self.max_depth,
        };
        let graph = tree.export(&options);

        match self.output {
            Some(output) => match graph.render_to_file(&output, &self.format) {
                Ok(rendered) => println!("{}", rendered.display()),
                Err(err) => eprintln!("Failed to render graph: {}", err),
            },
            None => {
                if let Err(err) = graph.display(&mut io::stdout()) {
                    eprintln!("Failed to write graph: {}", err);
                }
            }
        }
    }
}
