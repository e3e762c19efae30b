use super::backend::StorageBackend;
use crate::error::{GctError, Result};
use crate::model::Todo;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// JSON file backend: the whole collection lives in one pretty-printed array.
pub struct FsBackend {
    data_file: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// The regular file a write should land on. A symlinked data file is
    /// followed so the rename replaces its target, not the link.
    fn write_target(&self) -> Result<PathBuf> {
        match fs::symlink_metadata(&self.data_file) {
            Ok(meta) if meta.file_type().is_symlink() => {
                match fs::canonicalize(&self.data_file) {
                    Ok(target) => Ok(target),
                    // Dangling link: write where it points
                    Err(_) => {
                        let link = fs::read_link(&self.data_file).map_err(|e| {
                            GctError::file_system(
                                format!("failed to resolve data file {}", self.data_file.display()),
                                e,
                            )
                        })?;
                        Ok(match self.data_file.parent() {
                            Some(parent) => parent.join(link),
                            None => link,
                        })
                    }
                }
            }
            _ => Ok(self.data_file.clone()),
        }
    }

    fn ensure_parent_dir(target: &Path) -> Result<()> {
        let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(parent).map_err(|e| {
            GctError::file_system(
                format!("failed to create data directory {}", parent.display()),
                e,
            )
        })
    }

    fn tmp_path(target: &Path) -> PathBuf {
        let name = target
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("todos.json");
        target.with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }
}

fn discard_tmp(tmp_file: &Path) {
    match fs::remove_file(tmp_file) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            warn!(path = %tmp_file.display(), error = %e, "could not remove tmp file");
        }
        _ => {}
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Option<Vec<Todo>>> {
        let file = match File::open(&self.data_file) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.data_file.display(), "data file missing, starting empty");
                return Ok(None);
            }
            Err(e) => {
                return Err(GctError::file_system(
                    format!("failed to open data file {}", self.data_file.display()),
                    e,
                ))
            }
        };

        let todos: Vec<Todo> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            if e.is_io() {
                GctError::file_system(
                    format!("failed to read data file {}", self.data_file.display()),
                    e,
                )
            } else {
                GctError::json(
                    format!("failed to decode data file {}", self.data_file.display()),
                    e,
                )
            }
        })?;

        debug!(path = %self.data_file.display(), count = todos.len(), "loaded todos");
        Ok(Some(todos))
    }

    fn store(&self, todos: &[Todo]) -> Result<()> {
        let target = self.write_target()?;
        Self::ensure_parent_dir(&target)?;

        let content = serde_json::to_string_pretty(todos)
            .map_err(|e| GctError::json("failed to encode todos", e))?;

        // Atomic write: a crash leaves either the old or the new file, never half of one
        let tmp_file = Self::tmp_path(&target);
        if let Err(e) = fs::write(&tmp_file, content) {
            discard_tmp(&tmp_file);
            return Err(GctError::file_system(
                format!("failed to write data file {}", tmp_file.display()),
                e,
            ));
        }

        // The rename would otherwise reset the mode to the umask default
        if let Ok(meta) = fs::metadata(&target) {
            if let Err(e) = fs::set_permissions(&tmp_file, meta.permissions()) {
                warn!(path = %target.display(), error = %e, "could not keep data file permissions");
            }
        }

        if let Err(e) = fs::rename(&tmp_file, &target) {
            discard_tmp(&tmp_file);
            return Err(GctError::file_system(
                format!("failed to replace data file {}", target.display()),
                e,
            ));
        }

        info!(path = %target.display(), count = todos.len(), "wrote todos");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.data_file.clone()
    }
}
