use crate::error::{MouseMoveError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Размер и время изменения файла на момент последней успешной загрузки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSnapshot {
    pub size: u64,
    pub modified: SystemTime,
}

impl FileSnapshot {
    pub fn capture<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let stat_error = |source| MouseMoveError::ConfigStat {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(stat_error)?;
        let modified = metadata.modified().map_err(stat_error)?;

        Ok(Self {
            size: metadata.len(),
            modified,
        })
    }

    pub fn differs(&self, other: &FileSnapshot) -> bool {
        self.size != other.size || self.modified != other.modified
    }
}

/// Отслеживает изменения файла конфигурации по его метаданным, не читая содержимое.
///
/// Новый снимок фиксируется через [`ConfigWatcher::commit`] только после
/// успешной перезагрузки, поэтому неудачное чтение повторится в следующем цикле.
pub struct ConfigWatcher {
    path: PathBuf,
    snapshot: FileSnapshot,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf, snapshot: FileSnapshot) -> Self {
        Self { path, snapshot }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> &FileSnapshot {
        &self.snapshot
    }

    /// Возвращает новый снимок, если файл изменился с момента последней загрузки
    pub fn has_changed(&self) -> Result<Option<FileSnapshot>> {
        let current = FileSnapshot::capture(&self.path)?;

        if current.differs(&self.snapshot) {
            debug!(
                "Файл {:?} изменился: {} -> {} байт",
                self.path, self.snapshot.size, current.size
            );
            Ok(Some(current))
        } else {
            Ok(None)
        }
    }

    pub fn commit(&mut self, snapshot: FileSnapshot) {
        self.snapshot = snapshot;
    }
}
