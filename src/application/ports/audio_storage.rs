//! Audio Storage Port - 生成音频的存放与访问
//!
//! 定义输出文件的保存、定位与 URL 生成接口，实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// 文件名含路径分隔符或非法后缀
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

/// 已保存的音频文件
#[derive(Debug, Clone)]
pub struct StoredAudio {
    /// 生成的文件名（不含路径）
    pub filename: String,
    /// 磁盘绝对/相对路径
    pub path: PathBuf,
    /// 前端可访问的 URL 路径
    pub url: String,
}

/// Audio Storage Port
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 以唯一文件名保存一段 WAV 数据
    async fn save(&self, data: &[u8]) -> Result<StoredAudio, StorageError>;

    /// 把文件名解析为磁盘路径
    ///
    /// 必须拒绝任何可能逃出输出目录的文件名
    fn resolve(&self, filename: &str) -> Result<PathBuf, StorageError>;

    /// 读取一个已保存的文件
    async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError>;

    /// 文件对应的公开 URL
    fn public_url(&self, filename: &str) -> String;
}
