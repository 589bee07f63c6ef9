//! 内存存储

use crate::{validate_key, ObjectStore, Precondition, Revision, Snapshot, StorageResult};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// 进程内对象存储，严格执行前置条件
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置对象
    pub fn with_object(self, key: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.lock().insert(key.into(), data.into());
        self
    }

    /// 读取对象内容（测试辅助）
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    /// 所有对象键，按字典序
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectStore for MemoryStore {
    fn pull(&self, key: &str) -> StorageResult<Snapshot> {
        validate_key(key)?;
        Ok(match self.lock().get(key) {
            Some(data) => Snapshot::present(data.clone()),
            None => Snapshot::absent(),
        })
    }

    fn push(
        &self,
        key: &str,
        data: &[u8],
        precondition: &Precondition,
    ) -> StorageResult<Revision> {
        validate_key(key)?;
        let mut objects = self.lock();

        let current = objects.get(key).map(|data| Revision::of(data));
        precondition.check(key, current.as_ref())?;

        objects.insert(key.to_string(), data.to_vec());
        Ok(Revision::of(data))
    }
}
