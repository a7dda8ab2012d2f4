//! recode: convert a source tree to a canonical text encoding

use clap::Parser;
use recode_cli::{Cli, commands, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let config = cli.to_config()?;
    commands::convert::run(&config, cli.detector())?;

    Ok(())
}
