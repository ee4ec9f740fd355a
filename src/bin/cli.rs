// src/bin/cli.rs
use clap::Parser;
use poster_scrape::cli::{self, Cli};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    poster_scrape::log::init(cli.verbosity());
    cli::run(&cli)?;
    Ok(())
}
