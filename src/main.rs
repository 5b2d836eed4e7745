// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, run the command.
// - Returns `anyhow::Result` so a failed command prints its error and exits
//   non-zero.

use clap::Parser;
use outris_cli::{cli::Cli, commands, logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::initialize(cli.verbose)?;

    // Backend selection (mock vs real) happens once inside `run`; see
    // `api::create_client_with`.
    commands::run(cli)
}
