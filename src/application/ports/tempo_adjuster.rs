//! Tempo Adjuster Port - 变速不变调后处理
//!
//! 引擎原生语速范围之外的请求按 1.0 合成后，
//! 由外部编码器对输出文件做变速不变调处理

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 后处理错误
#[derive(Debug, Error)]
pub enum TempoError {
    #[error("Encoder not found: {0}")]
    EncoderNotFound(String),

    #[error("Encoder exited with {status}: {stderr}")]
    EncoderFailed { status: String, stderr: String },

    #[error("Invalid tempo factor: {0}")]
    InvalidFactor(f32),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Tempo Adjuster Port
///
/// 对已保存的音频文件做原地变速处理
#[async_trait]
pub trait TempoAdjusterPort: Send + Sync {
    /// 按 `factor` 倍速调整 `path` 指向的音频，保持音高不变
    ///
    /// 成功后原文件被调整后的版本替换
    async fn adjust(&self, path: &Path, factor: f32) -> Result<(), TempoError>;
}
