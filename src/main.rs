//! Process entry point: parses the top-level `Cli`, dispatches to
//! [`supercron::run_command`], and translates any `SuperCronError` into
//! the exit code it carries. No module below this one calls
//! `std::process::exit`.

mod cli;
mod supercron;
mod utils;

use clap::Parser;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    if let Err(err) = supercron::run_command(cli.command, quiet) {
        std::process::exit(err.exit_code());
    }
}
