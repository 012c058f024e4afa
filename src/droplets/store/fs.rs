use super::DropletRunner;
use crate::error::{DropletError, Result};
use crate::model::{validate_name, Droplet};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const RECORD_FILENAME: &str = "droplet.json";
const BITS_STEM: &str = "bits";
const STAGING_PREFIX: &str = ".staging-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    pub buildpack_url: String,
    pub requested_at: DateTime<Utc>,
}

/// Everything the file store knows about one droplet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropletRecord {
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// File name of the stored bits, relative to the droplet directory
    pub bits: String,
    #[serde(default)]
    pub build: Option<BuildRequest>,
    #[serde(default)]
    pub launched_at: Option<DateTime<Utc>>,
}

impl From<DropletRecord> for Droplet {
    fn from(record: DropletRecord) -> Self {
        Droplet {
            name: record.name,
            created_at: record.created_at,
        }
    }
}

/// Droplet runner backed by a local directory.
pub struct FileRunner {
    root: PathBuf,
}

impl FileRunner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn droplet_dir(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    pub fn load_record(&self, name: &str) -> Result<DropletRecord> {
        let record_file = self.droplet_dir(name)?.join(RECORD_FILENAME);
        if !record_file.exists() {
            return Err(DropletError::DropletNotFound(name.to_string()));
        }
        let content = fs::read_to_string(record_file)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_record(&self, record: &DropletRecord) -> Result<()> {
        let dir = self.droplet_dir(&record.name)?;
        fs::create_dir_all(&dir)?;
        let content = serde_json::to_string_pretty(record)?;
        fs::write(dir.join(RECORD_FILENAME), content)?;
        Ok(())
    }

    /// Keep the artifact's extension so a stored `.tar` stays recognisable.
    fn bits_filename(artifact: &Path) -> String {
        match artifact.extension() {
            Some(ext) => format!("{}.{}", BITS_STEM, ext.to_string_lossy()),
            None => BITS_STEM.to_string(),
        }
    }
}

impl DropletRunner for FileRunner {
    fn upload_bits(&mut self, name: &str, artifact: &Path) -> Result<()> {
        let dir = self.droplet_dir(name)?;
        fs::create_dir_all(&self.root)?;

        // The previous droplet is removed only once the new bits are staged.
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.root)?;
        let bits = Self::bits_filename(artifact);
        fs::copy(artifact, staging.path().join(&bits))?;

        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::rename(staging.path(), &dir)?;
        debug!("stored {} as {}", artifact.display(), dir.join(&bits).display());

        self.save_record(&DropletRecord {
            name: name.to_string(),
            created_at: Some(Utc::now()),
            bits,
            build: None,
            launched_at: None,
        })
    }

    fn build_droplet(&mut self, name: &str, buildpack_url: &str) -> Result<()> {
        let mut record = self.load_record(name)?;
        record.build = Some(BuildRequest {
            buildpack_url: buildpack_url.to_string(),
            requested_at: Utc::now(),
        });
        debug!("recorded build of {} with {}", name, buildpack_url);
        self.save_record(&record)
    }

    fn list_droplets(&self) -> Result<Vec<Droplet>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let record_file = entry.path().join(RECORD_FILENAME);
            if !record_file.is_file() {
                continue;
            }
            let content = fs::read_to_string(record_file)?;
            let record: DropletRecord = serde_json::from_str(&content)?;
            records.push(record);
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records.into_iter().map(Droplet::from).collect())
    }

    fn launch_droplet(&mut self, name: &str) -> Result<()> {
        let mut record = self.load_record(name)?;
        if record.build.is_none() {
            return Err(DropletError::Store(format!(
                "droplet {} has not been built",
                name
            )));
        }
        record.launched_at = Some(Utc::now());
        self.save_record(&record)
    }

    fn remove_droplet(&mut self, name: &str) -> Result<()> {
        let dir = self.droplet_dir(name)?;
        if !dir.join(RECORD_FILENAME).exists() {
            return Err(DropletError::DropletNotFound(name.to_string()));
        }
        fs::remove_dir_all(dir)?;
        Ok(())
    }
}
