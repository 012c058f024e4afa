//! # Droplet Runner Layer
//!
//! The command layer never talks to a droplet backend directly. Everything goes
//! through the [`DropletRunner`] capability trait, so commands can be exercised
//! against a recording stand-in and shipped against a real store.
//!
//! ## Implementations
//!
//! - [`fs::FileRunner`]: Production store. Keeps one directory per droplet under a
//!   store root and records build and launch requests next to the uploaded bits.
//! - [`memory::RecordingRunner`]: Records every call and returns scripted failures.
//!
//! ## Storage Layout (`FileRunner`)
//!
//! ```text
//! <store>/
//! └── <droplet-name>/
//!     ├── droplet.json   # DropletRecord
//!     └── bits.tar       # Uploaded artifact (extension follows the source)
//! ```

use crate::error::Result;
use crate::model::Droplet;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Operations offered by a droplet backend.
pub trait DropletRunner {
    /// Upload the artifact at `artifact` as the bits for `name`
    fn upload_bits(&mut self, name: &str, artifact: &Path) -> Result<()>;

    /// Request a build of `name` using the given buildpack
    fn build_droplet(&mut self, name: &str, buildpack_url: &str) -> Result<()>;

    /// List every known droplet
    fn list_droplets(&self) -> Result<Vec<Droplet>>;

    /// Launch a previously built droplet
    fn launch_droplet(&mut self, name: &str) -> Result<()>;

    /// Remove a droplet and its bits
    fn remove_droplet(&mut self, name: &str) -> Result<()>;
}
