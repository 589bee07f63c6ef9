//! 存储层错误类型

use thiserror::Error;

/// 存储端口错误
#[derive(Error, Debug)]
pub enum StorageError {
    /// 底层读写失败
    #[error("Storage IO error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// 写入前版本校验失败（另一个写入者已修改对象）
    #[error("Object {key} was modified since it was pulled")]
    Conflict { key: String },

    /// 非法对象键
    #[error("Invalid object key: {0:?}")]
    InvalidKey(String),
}

impl StorageError {
    /// 创建带对象键的IO错误
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }
}

/// 存储结果类型别名
pub type StorageResult<T> = Result<T, StorageError>;
