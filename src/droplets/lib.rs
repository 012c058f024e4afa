//! # Droplets Architecture
//!
//! Droplets is the command layer for managing pre-built application artifacts
//! ("droplets") on a remote runner. It packages local directories, uploads them,
//! requests builds, lists and launches droplets.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints messages and tables             │
//! │  - The ONLY place that knows about stdout/exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns runner + archiver        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, pipeline.rs)                 │
//! │  - Validates arguments, sequences steps                     │
//! │  - Classifies every failure into one exit code              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Packaging (resolve.rs, archive.rs) + Runner (store/)       │
//! │  - Directory → tar artifact                                 │
//! │  - DropletRunner trait: FileRunner, RecordingRunner         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Classification
//!
//! Commands never return `Err`. Each one produces a [`commands::CmdResult`] holding
//! its messages and at most one [`commands::ExitCode`]:
//!
//! - `InvalidSyntax`: wrong argument count or an invalid droplet name
//! - `FileSystemError`: the path to upload could not be opened or packaged
//! - `CommandFailed`: the droplet runner rejected the request
//!
//! A failure at any step prevents every later runner call.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per user-facing command
//! - [`pipeline`]: Fail-fast step sequencing
//! - [`archive`]: Directory packaging
//! - [`resolve`]: File vs directory resolution
//! - [`listing`]: Droplet table ordering and rendering
//! - [`store`]: Droplet runner trait and implementations
//! - [`model`]: `Droplet` and name validation
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod archive;
pub mod commands;
pub mod config;
pub mod error;
pub mod listing;
pub mod model;
pub mod pipeline;
pub mod resolve;
pub mod store;
