//! Configuration - 配置层
//!
//! 多源配置：默认值 < 配置文件 < TTSD_ 环境变量 < SUPERTONIC_* 引擎环境变量

mod loader;
mod types;

pub use loader::{load_config, load_config_from_path, print_config, ConfigError};
pub use types::{AppConfig, EncoderConfig, EngineConfig, LogConfig, ServerConfig, StorageConfig};
