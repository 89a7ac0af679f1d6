use crate::core::Storage;
use crate::utils::error::{GradeError, Result};
use std::fs;
use std::io::{BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File system storage. Relative paths resolve against `base_path`.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GradeError::SourceNotFound {
                path: path.to_string(),
            },
            _ => GradeError::io(path, e),
        })
    }

    /// Writes through a temp file in the target directory and renames it into
    /// place, so the target holds either the old content or the full report.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        let dir = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| GradeError::io(path, e))?;

        let mut temp = new_temp_in(&dir).map_err(|e| GradeError::io(path, e))?;
        // A replaced report keeps the mode it already had.
        if let Ok(existing) = fs::metadata(&full_path) {
            temp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| GradeError::io(path, e))?;
        }
        temp.write_all(data).map_err(|e| GradeError::io(path, e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| GradeError::io(path, e))?;
        temp.persist(&full_path)
            .map_err(|e| GradeError::io(path, e.error))?;

        tracing::debug!("Persisted {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}

/// Temp file created with the same mode a plain `fs::write` would get
/// (0o666 filtered by the umask) instead of tempfile's owner-only default.
#[cfg(unix)]
fn new_temp_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Writes `message`, then reads one line and returns it trimmed.
/// End of input yields an empty string.
pub fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
) -> std::io::Result<String> {
    write!(writer, "{}", message)?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
