mod cli;

use cli::commands::Command;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    cli::MinimaxTree::from_args().execute();
}
