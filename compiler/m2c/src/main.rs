//! m2c command-line syntax checker.

use std::io::IsTerminal;
use std::process::ExitCode;

use m2c::cli::{Cli, CliError, USAGE};

fn main() -> ExitCode {
    m2c::init_tracing();

    let cli = match Cli::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(CliError::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let is_tty = std::io::stderr().is_terminal();
    let summary = m2c::run(
        &cli,
        is_tty,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );

    if summary.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
