// src/bin/cli.rs
use vitibrasil_scrape::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init();
    cli::run()?;
    Ok(())
}
