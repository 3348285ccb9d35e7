use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{TidyError, TidyResult};

/// Destination for rewritten file contents.
///
/// The mutating services write through this trait so the write step can be
/// replaced (for instance by one that fails) without touching the filesystem
/// logic around it.
pub trait ContentWriter {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes straight to the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl ContentWriter for FsWriter {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// Sibling path used for the transient backup: `<file>.backup`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".backup");
    PathBuf::from(name)
}

/// A full-copy backup of a file taken before it is overwritten.
#[derive(Debug)]
pub struct Backup {
    original: PathBuf,
    backup: PathBuf,
}

impl Backup {
    pub fn create(path: &Path) -> TidyResult<Self> {
        let backup = backup_path(path);
        fs::copy(path, &backup).map_err(|e| TidyError::io(&backup, e))?;
        debug!(path = %backup.display(), "created backup");
        Ok(Self { original: path.to_path_buf(), backup })
    }

    pub fn path(&self) -> &Path {
        &self.backup
    }

    /// Drop the backup after a successful write.
    pub fn discard(self) -> TidyResult<()> {
        fs::remove_file(&self.backup).map_err(|e| TidyError::io(&self.backup, e))
    }

    /// Move the backup back over the original path.
    pub fn restore(self) -> TidyResult<()> {
        fs::rename(&self.backup, &self.original).map_err(|e| TidyError::io(&self.original, e))?;
        debug!(path = %self.original.display(), "restored backup");
        Ok(())
    }
}

/// Overwrite `path` with `contents`, keeping a backup for the duration.
///
/// On a write failure the original content is restored and the write error
/// is returned. A backup that cannot be removed after success is only logged.
pub fn write_with_backup(path: &Path, contents: &str, writer: &dyn ContentWriter) -> TidyResult<()> {
    let backup = Backup::create(path)?;

    if let Err(err) = writer.write(path, contents) {
        if let Err(restore_err) = backup.restore() {
            warn!(path = %path.display(), error = %restore_err, "failed to restore backup");
        }
        return Err(TidyError::io(path, err));
    }

    if let Err(err) = backup.discard() {
        warn!(path = %path.display(), error = %err, "failed to remove backup");
    }
    Ok(())
}
