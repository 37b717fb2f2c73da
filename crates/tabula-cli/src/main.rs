//! Entry point for the `tabula` binary.
//!
//! All work happens in [`tabula_cli::run`].

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    tabula_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
