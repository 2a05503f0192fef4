//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 输出存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 外部编码器配置
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（拼接音频 URL 用）
    /// 如果未设置，返回的 URL 为相对路径
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// 引擎服务基础 URL
    #[serde(default = "default_engine_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,

    /// 模型仓库（多语言支持: Supertone/supertonic-2）
    #[serde(default = "default_model_repo")]
    pub model_repo: String,

    /// 模型版本
    #[serde(default = "default_model_revision")]
    pub model_revision: String,

    /// 模型缓存目录，`~` 前缀会展开为 $HOME
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// 引擎音色列表为空时的兜底音色
    #[serde(default = "default_fallback_voice")]
    pub fallback_voice: String,

    /// 默认扩散步数（质量档位）
    #[serde(default = "default_steps")]
    pub default_steps: u32,

    /// 单次生成的合成尝试次数上限（含首次）
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_engine_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_engine_timeout() -> u64 {
    120
}

fn default_model_repo() -> String {
    "Supertone/supertonic-2".to_string()
}

fn default_model_revision() -> String {
    "main".to_string()
}

fn default_cache_dir() -> String {
    "~/.cache/supertonic-2".to_string()
}

fn default_fallback_voice() -> String {
    "M1".to_string()
}

fn default_steps() -> u32 {
    5
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            timeout_secs: default_engine_timeout(),
            model_repo: default_model_repo(),
            model_revision: default_model_revision(),
            cache_dir: default_cache_dir(),
            fallback_voice: default_fallback_voice(),
            default_steps: default_steps(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl EngineConfig {
    /// 展开 `~` 前缀后的缓存目录
    pub fn expanded_cache_dir(&self) -> String {
        expand_home(&self.cache_dir)
    }
}

/// 把路径开头的 `~` 展开为 $HOME
fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return format!("{}/{}", home.trim_end_matches('/'), rest);
        }
    }
    path.to_string()
}

/// 输出存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 生成音频的存放目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 静态托管的 URL 路径前缀
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/output")
}

fn default_public_path() -> String {
    "/output".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            public_path: default_public_path(),
        }
    }
}

/// 外部编码器配置
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfig {
    /// ffmpeg 可执行文件路径
    #[serde(default = "default_encoder_binary")]
    pub binary: String,
}

fn default_encoder_binary() -> String {
    "ffmpeg".to_string()
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            binary: default_encoder_binary(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志文件路径，设置后日志同时写入该文件（log 接口读取它）
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
