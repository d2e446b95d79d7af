use clap::Parser;
use collision_explorer::cli::{run, Cli};
use collision_explorer::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
