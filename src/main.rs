//! ALLSorts CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: resolve the process arguments and
//! exit with the matching status. For programmatic use, call
//! `allsorts_input::resolve` with an explicit argument list instead.

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    cli::run(std::env::args_os())
}
