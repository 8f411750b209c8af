// src/bin/cli.rs
use msfs_simvars::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
