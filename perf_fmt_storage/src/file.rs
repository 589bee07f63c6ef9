//! 本地目录存储
//!
//! 对象键映射为根目录下的相对路径。写入先落到同目录的临时文件，再原子重命名。

use crate::{validate_key, ObjectStore, Precondition, Revision, Snapshot, StorageError, StorageResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 基于目录的对象存储
///
/// 前置条件在写入前重新读取文件比较版本，读取与重命名之间没有锁。
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// 以给定目录为根创建存储（目录可以尚不存在）
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 对象键对应的文件路径
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(key
            .split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment)))
    }

    fn read_current(&self, key: &str, path: &Path) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}

impl ObjectStore for FileStore {
    fn pull(&self, key: &str) -> StorageResult<Snapshot> {
        let path = self.path_for(key)?;

        match self.read_current(key, &path)? {
            Some(data) => {
                tracing::debug!(target: "storage", "Pulled {} ({} bytes)", path.display(), data.len());
                Ok(Snapshot::present(data))
            }
            None => {
                tracing::debug!(target: "storage", "{} does not exist yet", path.display());
                Ok(Snapshot::absent())
            }
        }
    }

    fn push(
        &self,
        key: &str,
        data: &[u8],
        precondition: &Precondition,
    ) -> StorageResult<Revision> {
        let path = self.path_for(key)?;

        if *precondition != Precondition::Any {
            let current = self
                .read_current(key, &path)?
                .map(|data| Revision::of(&data));
            precondition.check(key, current.as_ref())?;
        }

        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir).map_err(|e| StorageError::io(key, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(key, e))?;
        tmp.write_all(data).map_err(|e| StorageError::io(key, e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StorageError::io(key, e))?;
        tmp.persist(&path)
            .map_err(|e| StorageError::io(key, e.error))?;

        tracing::debug!(target: "storage", "Pushed {} ({} bytes)", path.display(), data.len());
        Ok(Revision::of(data))
    }
}
