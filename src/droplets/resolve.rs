use crate::archive::Archiver;
use crate::error::{DropletError, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The path that ends up being handed to the droplet runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    /// True when `path` is an archive produced from a directory.
    pub packaged: bool,
}

/// Turn a user-supplied path into an uploadable artifact.
///
/// Files are used as-is; directories are packaged with `archiver`.
pub fn resolve_artifact(path: &Path, archiver: &Archiver) -> Result<Artifact> {
    let meta = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DropletError::PathNotFound(path.to_path_buf()),
        _ => DropletError::Io(e),
    })?;

    if meta.is_dir() {
        debug!("{} is a directory, packaging it", path.display());
        let archive = archiver.archive_dir(path)?;
        Ok(Artifact {
            path: archive,
            packaged: true,
        })
    } else {
        debug!("{} is a file, uploading as-is", path.display());
        Ok(Artifact {
            path: path.to_path_buf(),
            packaged: false,
        })
    }
}
