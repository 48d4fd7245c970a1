//! vipd entry point
//!
//! Minimal by contract: parse arguments, dispatch to the CLI module,
//! print errors to stderr, exit non-zero on failure. Configuration
//! loading and subsystem construction happen in `cli`, not here.

use vipd::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
