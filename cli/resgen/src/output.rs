//! All-or-nothing output writing.

use std::fs::{self, Metadata, OpenOptions, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

/// The output file could not be created or written.
#[derive(Debug, thiserror::Error)]
#[error("could not open {} for writing", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Write `bytes` to `path` through a temporary file in the same directory,
/// renamed into place only once everything has been written.
///
/// An existing target must be writable. A symlinked target is followed, so
/// the file it points to is replaced and the link itself is kept. The new
/// file takes the existing target's permissions, or 0644 when there is none.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let fail = |source: io::Error| WriteError {
        path: path.to_path_buf(),
        source,
    };

    let existing = match fs::metadata(path) {
        Ok(meta) => Some(meta),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(fail(e)),
    };

    let target = match &existing {
        Some(meta) => {
            if meta.permissions().readonly() {
                return Err(fail(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "target is read-only",
                )));
            }
            OpenOptions::new().write(true).open(path).map_err(fail)?;
            fs::canonicalize(path).map_err(fail)?
        }
        None => path.to_path_buf(),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(fail)?;
    tmp.write_all(bytes).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    if let Some(perms) = output_permissions(existing.as_ref()) {
        tmp.as_file().set_permissions(perms).map_err(fail)?;
    }

    tmp.persist(&target).map_err(|e| fail(e.error))?;
    debug!(path = %path.display(), target = %target.display(), "replaced output");
    Ok(())
}

/// Permissions for the new file: the replaced target's, else 0644.
#[cfg(unix)]
fn output_permissions(existing: Option<&Metadata>) -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(match existing {
        Some(meta) => meta.permissions(),
        None => Permissions::from_mode(0o644),
    })
}

#[cfg(not(unix))]
fn output_permissions(existing: Option<&Metadata>) -> Option<Permissions> {
    existing.map(Metadata::permissions)
}
