//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{EngineError, StorageError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求参数无效
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 资源未找到
    #[error("{0} not found")]
    NotFound(String),

    /// 引擎不可用（未初始化或连接失败）
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    /// 引擎合成失败
    #[error("Engine error: {0}")]
    EngineError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建 NotFound 错误
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

impl From<EngineError> for ApplicationError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Unavailable(msg) => Self::EngineUnavailable(msg),
            EngineError::NetworkError(msg) => Self::EngineUnavailable(msg),
            EngineError::Timeout => Self::EngineUnavailable("request timeout".to_string()),
            other => Self::EngineError(other.to_string()),
        }
    }
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::FileNotFound(name) => Self::NotFound(format!("file {}", name)),
            StorageError::InvalidFilename(name) => {
                Self::ValidationError(format!("invalid filename: {}", name))
            }
            StorageError::IoError(msg) => Self::StorageError(msg),
        }
    }
}
