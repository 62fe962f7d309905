use clap::Parser;
use scaffolder_cli::{commands, logging, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);
    commands::run(cli)
}
