//! Stats command - search a position and count the recorded tree.

use structopt::StructOpt;

use super::util::{run_search, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct StatsArgs {
    #[structopt(flatten)]
    pub search: SearchArgs,
}

impl Command for StatsArgs {
    fn execute(self) {
        match run_search(&self.search) {
            Ok((tree, report)) => {
                print!("{}", report);
                println!("{}", tree.stats().summary(self.search.quiescence));
            }
            Err(err) => eprintln!("{}", err),
        }
    }
}
