//! TTS Engine Port - TTS 引擎抽象
//!
//! 定义对外部 Supertonic 引擎的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine not available: {0}")]
    Unavailable(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Engine error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 引擎拒绝文本中的特定字符
    ///
    /// `chars` 是引擎错误消息中点名的字符，调用方可以剔除后重试
    #[error("Unsupported characters: {message}")]
    UnsupportedCharacters { chars: Vec<String>, message: String },
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本（已规范化）
    pub text: String,
    /// 音色名
    pub voice: String,
    /// 引擎语速（必须在引擎原生范围内）
    pub speed: f32,
    /// 音高，原样转发给引擎
    pub pitch: f32,
    /// 扩散步数（质量档位）
    pub steps: u32,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// WAV 音频数据
    pub audio_data: Vec<u8>,
    /// 音频时长（毫秒），引擎未报告时为 None
    pub duration_ms: Option<u64>,
    /// 采样率
    pub sample_rate: Option<u32>,
}

/// 引擎模型信息
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub repo: String,
    pub revision: String,
    pub sample_rate: Option<u32>,
}

/// TTS Engine Port
///
/// 外部 TTS 引擎的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 执行合成，返回音频数据与元信息
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisOutput, EngineError>;

    /// 获取引擎的音色名列表
    async fn voice_names(&self) -> Result<Vec<String>, EngineError>;

    /// 获取引擎当前加载的模型信息
    async fn model_info(&self) -> Result<ModelInfo, EngineError>;

    /// 检查引擎是否可用
    async fn health_check(&self) -> bool {
        true
    }
}
