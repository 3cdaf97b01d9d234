//! githist - per-file git history metadata
//!
//! Binary entry point.

use clap::Parser;

use githist::cli::{self, Cli};
use githist::logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::setup_logger(logging::level_for(cli.verbose, cli.quiet));

    let query = cli.query()?;
    cli::log_git_version(&query);

    let stdout = std::io::stdout();
    cli::execute(&cli, &query, &mut stdout.lock())
}
