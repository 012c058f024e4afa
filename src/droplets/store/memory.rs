use super::DropletRunner;
use crate::error::{DropletError, Result};
use crate::model::Droplet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct UploadCall {
    pub name: String,
    pub path: PathBuf,
    /// Artifact bytes as they were when the upload was requested
    pub content: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCall {
    pub name: String,
    pub buildpack_url: String,
}

/// In-memory runner that records every call and replays scripted results.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub uploads: Vec<UploadCall>,
    pub builds: Vec<BuildCall>,
    pub launches: Vec<String>,
    pub removals: Vec<String>,
    list_calls: std::cell::Cell<usize>,

    droplets: Vec<Droplet>,
    upload_error: Option<String>,
    build_error: Option<String>,
    list_error: Option<String>,
    launch_error: Option<String>,
    remove_error: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_droplets(mut self, droplets: Vec<Droplet>) -> Self {
        self.droplets = droplets;
        self
    }

    pub fn upload_bits_returns(&mut self, err: impl Into<String>) {
        self.upload_error = Some(err.into());
    }

    pub fn build_droplet_returns(&mut self, err: impl Into<String>) {
        self.build_error = Some(err.into());
    }

    pub fn list_droplets_returns(&mut self, err: impl Into<String>) {
        self.list_error = Some(err.into());
    }

    pub fn launch_droplet_returns(&mut self, err: impl Into<String>) {
        self.launch_error = Some(err.into());
    }

    pub fn remove_droplet_returns(&mut self, err: impl Into<String>) {
        self.remove_error = Some(err.into());
    }

    pub fn upload_bits_call_count(&self) -> usize {
        self.uploads.len()
    }

    pub fn build_droplet_call_count(&self) -> usize {
        self.builds.len()
    }

    pub fn list_droplets_call_count(&self) -> usize {
        self.list_calls.get()
    }

    pub fn launch_droplet_call_count(&self) -> usize {
        self.launches.len()
    }

    pub fn remove_droplet_call_count(&self) -> usize {
        self.removals.len()
    }

    pub fn total_call_count(&self) -> usize {
        self.upload_bits_call_count()
            + self.build_droplet_call_count()
            + self.list_droplets_call_count()
            + self.launch_droplet_call_count()
            + self.remove_droplet_call_count()
    }
}

fn scripted(err: &Option<String>) -> Result<()> {
    match err {
        Some(message) => Err(DropletError::Remote(message.clone())),
        None => Ok(()),
    }
}

impl DropletRunner for RecordingRunner {
    fn upload_bits(&mut self, name: &str, artifact: &Path) -> Result<()> {
        self.uploads.push(UploadCall {
            name: name.to_string(),
            path: artifact.to_path_buf(),
            content: fs::read(artifact).ok(),
        });
        scripted(&self.upload_error)
    }

    fn build_droplet(&mut self, name: &str, buildpack_url: &str) -> Result<()> {
        self.builds.push(BuildCall {
            name: name.to_string(),
            buildpack_url: buildpack_url.to_string(),
        });
        scripted(&self.build_error)
    }

    fn list_droplets(&self) -> Result<Vec<Droplet>> {
        self.list_calls.set(self.list_calls.get() + 1);
        scripted(&self.list_error)?;
        Ok(self.droplets.clone())
    }

    fn launch_droplet(&mut self, name: &str) -> Result<()> {
        self.launches.push(name.to_string());
        scripted(&self.launch_error)
    }

    fn remove_droplet(&mut self, name: &str) -> Result<()> {
        self.removals.push(name.to_string());
        scripted(&self.remove_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_and_counts() {
        let mut runner = RecordingRunner::new();
        runner.build_droplet("app", "http://bp").unwrap();
        runner.launch_droplet("app").unwrap();
        runner.list_droplets().unwrap();

        assert_eq!(runner.build_droplet_call_count(), 1);
        assert_eq!(runner.launch_droplet_call_count(), 1);
        assert_eq!(runner.list_droplets_call_count(), 1);
        assert_eq!(runner.total_call_count(), 3);
        assert_eq!(
            runner.builds[0],
            BuildCall {
                name: "app".into(),
                buildpack_url: "http://bp".into()
            }
        );
    }

    #[test]
    fn scripted_errors_are_remote_errors() {
        let mut runner = RecordingRunner::new();
        runner.launch_droplet_returns("failed");
        let err = runner.launch_droplet("app").unwrap_err();
        assert_eq!(err.to_string(), "failed");
        assert_eq!(runner.launch_droplet_call_count(), 1);
    }

    #[test]
    fn upload_captures_artifact_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bits");
        fs::write(&file, "payload").unwrap();

        let mut runner = RecordingRunner::new();
        runner.upload_bits("app", &file).unwrap();
        assert_eq!(runner.uploads[0].content.as_deref(), Some(&b"payload"[..]));
    }
}
