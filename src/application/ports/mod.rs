//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_storage;
mod tempo_adjuster;
mod tts_engine;

pub use audio_storage::{AudioStoragePort, StorageError, StoredAudio};
pub use tempo_adjuster::{TempoAdjusterPort, TempoError};
pub use tts_engine::{
    EngineError, ModelInfo, SynthesisOutput, SynthesisRequest, TtsEnginePort,
};
