//! # CLI Behavior
//!
//! This is **one possible UI client** for cheatnote. The CLI is the only place
//! that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the
//! `cheatnote` library.
//!
//! ### Naked Execution (`cheatnote`)
//!
//! Running `cheatnote` with no arguments lists every note.
//!
//! ### Positional or Flagged
//!
//! Every field can be given as a flag (`-t`, `-c`, `-g`, `-i`) or
//! positionally in the documented order. Flags win over positionals.
//!
//! ### Database Location
//!
//! `--db PATH`, then `CHEATNOTE_DB`, then the platform data directory, then
//! `./cheatnote.db`. Display preferences live in `config.json` next to the
//! database file.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting (notes, stats, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
