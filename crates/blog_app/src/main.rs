mod admin;
mod app;
mod cli;
mod effects;
mod persistence;
mod ui;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    engine_logging::initialize(cli.log.into(), cli.log_level());
    app::run(&cli)
}
