//! # Cheatnote CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only initializes logging, invokes `cli::run()` and turns an error into a
//! non-zero exit status.
//!
//! Logging goes to stderr through `env_logger`; set `RUST_LOG=cheatnote=debug`
//! to see load and save events.

use colored::Colorize;

mod cli;

fn main() {
    env_logger::init();

    if let Err(e) = cli::run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}
