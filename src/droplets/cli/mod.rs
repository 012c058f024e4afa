//! # CLI Layer
//!
//! This module is **one possible UI client** for droplets. It is the only place that:
//! - Parses arguments (clap)
//! - Prints to stdout
//! - Decides the process exit code
//!
//! ## Exit Codes
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success (also `--help` / `--version`)           |
//! | 1    | Invalid syntax (clap errors, bad arguments)     |
//! | 2    | Command failed (the droplet runner said no)     |
//! | 3    | File system error (path missing or unreadable)  |
//!
//! ## Environment
//!
//! - `DROPLETS_HOME`: home directory holding `config.json` and, by default, the store
//! - `RUST_LOG`: overrides the log filter (`-v` sets `debug`)
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch from parsed arguments to the API
//! - `print`: Message and table output
//! - `setup`: Argument definitions

mod commands;
mod print;
pub mod setup;

pub use commands::run;
