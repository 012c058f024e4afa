//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every droplet operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Owns** the droplet runner and the archiver configuration
//! - **Returns** a [`CmdResult`] for every call; failures are already classified
//!
//! ## Generic Over DropletRunner
//!
//! `DropletsApi<R: DropletRunner>` is generic over the backend:
//! - Production: `DropletsApi<FileRunner>`
//! - Testing: `DropletsApi<RecordingRunner>`

use crate::archive::Archiver;
use crate::commands;
use crate::store::DropletRunner;
use std::path::Path;

pub struct DropletsApi<R: DropletRunner> {
    runner: R,
    archiver: Archiver,
}

impl<R: DropletRunner> DropletsApi<R> {
    pub fn new(runner: R, archiver: Archiver) -> Self {
        Self { runner, archiver }
    }

    pub fn upload_bits(&mut self, args: &[String]) -> CmdResult {
        commands::upload_bits::run(&mut self.runner, &self.archiver, args)
    }

    pub fn build_droplet(&mut self, source_dir: &Path, args: &[String]) -> CmdResult {
        commands::build::run(&mut self.runner, &self.archiver, source_dir, args)
    }

    pub fn list_droplets(&self) -> CmdResult {
        commands::list::run(&self.runner)
    }

    pub fn launch_droplet(&mut self, name: &str) -> CmdResult {
        commands::launch::run(&mut self.runner, name)
    }

    pub fn remove_droplet(&mut self, name: &str) -> CmdResult {
        commands::remove::run(&mut self.runner, name)
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}

pub use crate::commands::{CmdMessage, CmdResult, ExitCode, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::RecordingRunner;
    use std::fs;

    fn api() -> DropletsApi<RecordingRunner> {
        DropletsApi::new(RecordingRunner::new(), Archiver::new())
    }

    #[test]
    fn upload_dispatches_to_runner() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bits.zip");
        fs::write(&file, "zip").unwrap();
        let mut api = api();

        let result = api.upload_bits(&["app".to_string(), file.to_string_lossy().into_owned()]);

        assert!(result.is_success());
        assert_eq!(api.runner().upload_bits_call_count(), 1);
    }

    #[test]
    fn build_uploads_then_builds() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("Procfile"), "web: ./run").unwrap();
        let out = tempfile::tempdir().unwrap();
        let mut api = DropletsApi::new(RecordingRunner::new(), Archiver::with_temp_dir(out.path()));

        let result = api.build_droplet(src.path(), &["app".to_string(), "http://bp".to_string()]);

        assert!(result.is_success());
        assert_eq!(api.runner().upload_bits_call_count(), 1);
        assert_eq!(api.runner().build_droplet_call_count(), 1);
    }

    #[test]
    fn list_launch_and_remove_dispatch() {
        let mut api = api();
        api.list_droplets();
        api.launch_droplet("app");
        api.remove_droplet("app");

        let runner = api.runner();
        assert_eq!(runner.list_droplets_call_count(), 1);
        assert_eq!(runner.launch_droplet_call_count(), 1);
        assert_eq!(runner.remove_droplet_call_count(), 1);
    }
}
