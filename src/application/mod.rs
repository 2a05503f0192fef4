//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、AudioStorage、TempoAdjuster）
//! - engine: 惰性初始化的引擎句柄
//! - commands: 命令及处理器（语音生成）
//! - queries: 查询及处理器（音色 / 状态 / 模型配置）
//! - error: 应用层错误定义

pub mod commands;
pub mod engine;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{GenerateSpeechCommand, GenerateSpeechHandler, GenerateSpeechResponse};
pub use engine::EngineHandle;
pub use error::ApplicationError;
pub use ports::{
    AudioStoragePort, EngineError, ModelInfo, StorageError, StoredAudio, SynthesisOutput,
    SynthesisRequest, TempoAdjusterPort, TempoError, TtsEnginePort,
};
pub use queries::{
    EngineStatus, EngineStatusHandler, ListVoicesHandler, ModelConfigHandler, ModelConfigView,
    ModelSettings,
};
