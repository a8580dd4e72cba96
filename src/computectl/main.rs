//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and turns its result into an exit status.

use computectl::error::ComputectlError;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        match e {
            ComputectlError::Command { .. } => eprintln!("{}", e),
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}
