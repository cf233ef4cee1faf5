//! gifsheet - Command-line tool for building sprite sheets from animations

use std::process::ExitCode;

use gifsheet::cli;

fn main() -> ExitCode {
    cli::run()
}
