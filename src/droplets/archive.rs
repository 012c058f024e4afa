//! # Archiver
//!
//! Packages a directory tree into a single tar stream so it can be handed to a
//! droplet runner as one artifact.
//!
//! ## Entry Order
//!
//! The walk is depth-first. Within a directory, entries are visited in the
//! byte-wise order of their names, and a subdirectory's contents follow its own
//! entry immediately:
//!
//! ```text
//! aaa
//! bbb
//! ccc
//! subfolder/
//! subfolder/sub
//! ```
//!
//! The root directory itself is never emitted; every entry name is relative to it.
//!
//! ## Metadata
//!
//! - Permission bits are copied verbatim (`mode & 0o7777`).
//! - uid/gid are zeroed and owner names left empty, so identical trees
//!   serialize to identical bytes.
//! - File sizes come from the opened handle, and exactly that many bytes are
//!   streamed. A file that shrinks mid-read fails the archive.
//! - The archive never contains itself, even when it is written inside the
//!   tree being packaged.
//! - Only regular files and directories are packaged. Symlinks, sockets,
//!   FIFOs and devices abort the whole archive with
//!   [`DropletError::UnsupportedEntry`].

use crate::error::{DropletError, Result};
use log::{debug, trace};
use std::fs::{self, File, Metadata};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tar::{EntryType, Header};

/// Suffix carried by every packaged artifact.
pub const ARCHIVE_SUFFIX: &str = ".tar";

const ARCHIVE_PREFIX: &str = "droplet-";

/// Creates tar archives of directories in a temporary location.
#[derive(Debug, Clone, Default)]
pub struct Archiver {
    temp_dir: Option<PathBuf>,
}

impl Archiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create archives under `dir` instead of the OS temp directory.
    pub fn with_temp_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: Some(dir.into()),
        }
    }

    /// Archive `root` into a new `droplet-*.tar` temp file and return its path.
    ///
    /// The file is kept on disk; the caller owns it from here on. On failure the
    /// half-written file is removed and no path is returned.
    pub fn archive_dir(&self, root: &Path) -> Result<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(ARCHIVE_PREFIX).suffix(ARCHIVE_SUFFIX);
        let temp = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let (file, temp_path) = temp.into_parts();
        debug!("archiving {} into {}", root.display(), temp_path.display());

        // Walk canonical paths so the output file is recognised if it lies
        // inside the tree.
        let output = fs::canonicalize(&temp_path)?;
        let root = fs::canonicalize(root).map_err(|source| DropletError::Archive {
            path: root.to_path_buf(),
            source,
        })?;

        let writer = write_archive_skipping(&root, BufWriter::new(file), Some(&output))?;
        writer
            .into_inner()
            .map_err(|e| DropletError::Io(e.into_error()))?
            .sync_all()?;

        let path = temp_path.keep().map_err(|e| DropletError::Io(e.error))?;
        Ok(path)
    }
}

/// Write the tar stream for `root` into `writer` and hand the writer back.
pub fn write_archive<W: Write>(root: &Path, writer: W) -> Result<W> {
    write_archive_skipping(root, writer, None)
}

fn write_archive_skipping<W: Write>(root: &Path, writer: W, skip: Option<&Path>) -> Result<W> {
    let mut tar = tar::Builder::new(writer);
    append_dir_contents(&mut tar, root, Path::new(""), skip)?;
    tar.into_inner().map_err(|source| DropletError::Archive {
        path: root.to_path_buf(),
        source,
    })
}

fn append_dir_contents<W: Write>(
    tar: &mut tar::Builder<W>,
    dir: &Path,
    rel: &Path,
    skip: Option<&Path>,
) -> Result<()> {
    for (path, name) in sorted_entries(dir)? {
        if skip == Some(path.as_path()) {
            debug!("skipping archive output {}", path.display());
            continue;
        }
        let meta = fs::symlink_metadata(&path).map_err(|source| DropletError::Archive {
            path: path.clone(),
            source,
        })?;
        let entry_rel = rel.join(&name);
        let file_type = meta.file_type();

        if file_type.is_dir() {
            trace!("dir  {} ({:o})", entry_rel.display(), mode_bits(&meta));
            let mut header = entry_header(&meta, EntryType::Directory, 0);
            tar.append_data(&mut header, &entry_rel, io::empty())
                .map_err(|source| DropletError::Archive {
                    path: path.clone(),
                    source,
                })?;
            append_dir_contents(tar, &path, &entry_rel, skip)?;
        } else if file_type.is_file() {
            trace!("file {} ({:o})", entry_rel.display(), mode_bits(&meta));
            let opened = File::open(&path).and_then(|file| {
                let meta = file.metadata()?;
                Ok((file, meta))
            });
            let (file, meta) = opened.map_err(|source| DropletError::Archive {
                path: path.clone(),
                source,
            })?;
            let mut header = entry_header(&meta, EntryType::Regular, meta.len());
            tar.append_data(&mut header, &entry_rel, ExactReader::new(file, meta.len()))
                .map_err(|source| DropletError::Archive { path, source })?;
        } else {
            return Err(DropletError::UnsupportedEntry { path });
        }
    }
    Ok(())
}

/// Yields exactly `len` bytes, failing with `UnexpectedEof` if the source ends
/// first. Bytes past `len` are ignored.
struct ExactReader<R> {
    inner: io::Take<R>,
    len: u64,
}

impl<R: Read> ExactReader<R> {
    fn new(inner: R, len: u64) -> Self {
        Self {
            inner: inner.take(len),
            len,
        }
    }
}

impl<R: Read> Read for ExactReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() && self.inner.limit() > 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "file shrank while archiving ({} of {} bytes read)",
                    self.len - self.inner.limit(),
                    self.len
                ),
            ));
        }
        Ok(n)
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<(PathBuf, std::ffi::OsString)>> {
    let read = fs::read_dir(dir).map_err(|source| DropletError::Archive {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| DropletError::Archive {
            path: dir.to_path_buf(),
            source,
        })?;
        entries.push((entry.path(), entry.file_name()));
    }
    entries.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(entries)
}

fn entry_header(meta: &Metadata, entry_type: EntryType, size: u64) -> Header {
    let mut header = Header::new_gnu();
    header.set_entry_type(entry_type);
    header.set_size(size);
    header.set_mode(mode_bits(meta));
    header.set_mtime(mtime_secs(meta));
    header.set_uid(0);
    header.set_gid(0);
    header
}

#[cfg(unix)]
fn mode_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_bits(meta: &Metadata) -> u32 {
    if meta.is_dir() {
        0o755
    } else {
        0o644
    }
}

fn mtime_secs(meta: &Metadata) -> u64 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
