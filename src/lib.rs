//! ttsd - Supertonic TTS HTTP 网关
//!
//! 把外部 Supertonic 神经 TTS 引擎包装成一个小型 JSON API：
//! 惰性引擎初始化、文本 NFC 规范化、不支持字符的剔除重试、
//! 原生语速范围之外的 ffmpeg 变速后处理、生成音频的落盘与托管。
//!
//! 架构: Hexagonal (Ports & Adapters)
//!
//! 领域层 (domain/):
//! - text: 文本规范化与字符剔除
//! - speed: 语速规划
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, AudioStorage, TempoAdjuster）
//! - Engine: 惰性初始化的引擎句柄
//! - Commands/Queries: 生成命令与音色/状态/模型配置查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（axum）
//! - Adapters: 引擎 HTTP 客户端、文件存储、ffmpeg 变速

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
