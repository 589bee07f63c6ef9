//! # perf_fmt 存储端口
//!
//! 历史对象按相对键（如 `bench/browser/history.json`）整体存取。
//! 一次运行先拉取对象，在内存中改写，再整体写回。
//!
//! ## Modules
//!
//! - [`file`]: 基于目录的存储
//! - [`memory`]: 进程内存储，用于测试
//! - [`error`]: 存储错误
//!
//! ## Example
//!
//! ```rust
//! use perf_fmt_storage::{MemoryStore, ObjectStore};
//!
//! let store = MemoryStore::new();
//! let snapshot = store.pull("wpt/history.json").unwrap();
//! assert!(snapshot.is_empty());
//!
//! store.push("wpt/history.json", b"[]\n", &snapshot.precondition()).unwrap();
//! assert_eq!(store.pull("wpt/history.json").unwrap().data, b"[]\n");
//! ```

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use sha2::{Digest, Sha256};
use std::fmt;

/// 对象内容版本（内容的 SHA-256 十六进制摘要）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    /// 计算一段内容的版本
    pub fn of(data: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(data)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 拉取结果
///
/// 对象不存在时 `data` 为空、`revision` 为 `None`，不视为错误。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub data: Vec<u8>,
    pub revision: Option<Revision>,
}

impl Snapshot {
    /// 不存在的对象
    pub fn absent() -> Self {
        Self::default()
    }

    /// 由已存在的内容构造
    pub fn present(data: Vec<u8>) -> Self {
        let revision = Some(Revision::of(&data));
        Self { data, revision }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 以本次拉取为基准的写入前置条件
    pub fn precondition(&self) -> Precondition {
        match &self.revision {
            Some(revision) => Precondition::Matches(revision.clone()),
            None => Precondition::Absent,
        }
    }
}

/// 写入前置条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// 无条件覆盖（后写入者胜出）
    Any,
    /// 对象必须仍不存在
    Absent,
    /// 对象当前版本必须等于给定版本
    Matches(Revision),
}

impl Precondition {
    /// 根据对象当前版本检查前置条件
    pub fn check(&self, key: &str, current: Option<&Revision>) -> StorageResult<()> {
        let satisfied = match (self, current) {
            (Precondition::Any, _) => true,
            (Precondition::Absent, None) => true,
            (Precondition::Absent, Some(_)) => false,
            (Precondition::Matches(expected), Some(current)) => expected == current,
            (Precondition::Matches(_), None) => false,
        };

        if satisfied {
            Ok(())
        } else {
            Err(StorageError::Conflict {
                key: key.to_string(),
            })
        }
    }
}

/// 存储端口
///
/// 整体读取、整体替换。实现可以选择是否严格执行 [`Precondition`]。
pub trait ObjectStore {
    /// 拉取对象，不存在时返回空快照
    fn pull(&self, key: &str) -> StorageResult<Snapshot>;

    /// 整体替换对象，返回新版本
    fn push(&self, key: &str, data: &[u8], precondition: &Precondition)
        -> StorageResult<Revision>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn pull(&self, key: &str) -> StorageResult<Snapshot> {
        (**self).pull(key)
    }

    fn push(
        &self,
        key: &str,
        data: &[u8],
        precondition: &Precondition,
    ) -> StorageResult<Revision> {
        (**self).push(key, data, precondition)
    }
}

impl<S: ObjectStore + ?Sized> ObjectStore for Box<S> {
    fn pull(&self, key: &str) -> StorageResult<Snapshot> {
        (**self).pull(key)
    }

    fn push(
        &self,
        key: &str,
        data: &[u8],
        precondition: &Precondition,
    ) -> StorageResult<Revision> {
        (**self).push(key, data, precondition)
    }
}

/// 校验对象键：相对路径、`/` 分隔、不含空段与 `..`
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('/')
        && !key.contains('\\')
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// 拼接对象键，空前缀时原样返回
pub fn join_key(prefix: &str, key: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", prefix, key)
    }
}
