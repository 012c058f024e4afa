//! `droplets` binary.
//!
//! Everything lives in `cli/`; this file only turns the outcome of `cli::run()`
//! into a process exit.

mod cli;

use droplets::api::ExitCode;

fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(ExitCode::CommandFailed.code());
        }
    }
}
