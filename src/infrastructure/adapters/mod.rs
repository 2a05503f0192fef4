//! Infrastructure Adapters - 端口实现
//!
//! - tts: 引擎客户端（HTTP sidecar / 测试用 Fake）
//! - storage: 文件系统音频存储
//! - tempo: ffmpeg 变速后处理

pub mod storage;
pub mod tempo;
pub mod tts;

pub use storage::FileAudioStorage;
pub use tempo::FfmpegTempoAdjuster;
pub use tts::{FakeEngineClient, FakeEngineConfig, HttpEngineClient, HttpEngineClientConfig};
