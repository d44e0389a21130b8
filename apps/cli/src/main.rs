//! Victory.css build CLI.
//!
//! Compiles, prefixes, minifies and stamps the framework's stylesheets and
//! scripts, and regenerates the examples index and README page.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
