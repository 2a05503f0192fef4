//! Engine Queries - 音色 / 状态 / 模型配置查询

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::engine::EngineHandle;
use crate::application::error::ApplicationError;
use crate::domain::speed::{NATIVE_SPEED_MAX, NATIVE_SPEED_MIN};

// ============================================================================
// ListVoices
// ============================================================================

/// ListVoices Handler
///
/// 首次调用会触发引擎惰性初始化
pub struct ListVoicesHandler {
    engine: Arc<EngineHandle>,
}

impl ListVoicesHandler {
    pub fn new(engine: Arc<EngineHandle>) -> Self {
        Self { engine }
    }

    pub async fn handle(&self) -> Result<Vec<String>, ApplicationError> {
        Ok(self.engine.voices().await?.to_vec())
    }
}

// ============================================================================
// EngineStatus
// ============================================================================

/// 引擎状态视图
#[derive(Debug, Clone)]
pub struct EngineStatus {
    /// 惰性初始化是否已发生
    pub initialized: bool,
    /// 引擎健康探测结果
    pub healthy: bool,
    /// 已缓存的音色数（未初始化时为 None）
    pub voice_count: Option<usize>,
    pub engine_url: String,
    pub uptime_secs: i64,
}

/// EngineStatus Handler
///
/// 状态查询本身不触发引擎初始化
pub struct EngineStatusHandler {
    engine: Arc<EngineHandle>,
    engine_url: String,
    started_at: DateTime<Utc>,
}

impl EngineStatusHandler {
    pub fn new(engine: Arc<EngineHandle>, engine_url: impl Into<String>) -> Self {
        Self {
            engine,
            engine_url: engine_url.into(),
            started_at: Utc::now(),
        }
    }

    pub async fn handle(&self) -> EngineStatus {
        EngineStatus {
            initialized: self.engine.is_initialized(),
            healthy: self.engine.health_check().await,
            voice_count: self.engine.cached_voices().map(|v| v.len()),
            engine_url: self.engine_url.clone(),
            uptime_secs: (Utc::now() - self.started_at).num_seconds(),
        }
    }
}

// ============================================================================
// ModelConfig
// ============================================================================

/// 配置的模型参数（来自配置层）
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model_repo: String,
    pub model_revision: String,
    pub cache_dir: String,
    pub fallback_voice: String,
    pub default_steps: u32,
}

/// 模型配置视图
#[derive(Debug, Clone)]
pub struct ModelConfigView {
    pub model_repo: String,
    pub model_revision: String,
    pub cache_dir: String,
    pub fallback_voice: String,
    pub default_steps: u32,
    pub native_speed_min: f32,
    pub native_speed_max: f32,
    /// 引擎可达且已初始化时补充的实际采样率
    pub sample_rate: Option<u32>,
}

/// ModelConfig Handler
pub struct ModelConfigHandler {
    engine: Arc<EngineHandle>,
    settings: ModelSettings,
}

impl ModelConfigHandler {
    pub fn new(engine: Arc<EngineHandle>, settings: ModelSettings) -> Self {
        Self { engine, settings }
    }

    pub async fn handle(&self) -> ModelConfigView {
        // 引擎已初始化时尝试补充实时模型信息，失败则仅返回配置值
        let sample_rate = if self.engine.is_initialized() {
            match self.engine.model_info().await {
                Ok(info) => info.sample_rate,
                Err(err) => {
                    tracing::debug!(error = %err, "Engine model info unavailable");
                    None
                }
            }
        } else {
            None
        };

        ModelConfigView {
            model_repo: self.settings.model_repo.clone(),
            model_revision: self.settings.model_revision.clone(),
            cache_dir: self.settings.cache_dir.clone(),
            fallback_voice: self.settings.fallback_voice.clone(),
            default_steps: self.settings.default_steps,
            native_speed_min: NATIVE_SPEED_MIN,
            native_speed_max: NATIVE_SPEED_MAX,
            sample_rate,
        }
    }
}
