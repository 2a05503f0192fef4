//! Application State
//!
//! 包含所有 Handler 的应用状态

use std::sync::Arc;

use crate::application::{
    AudioStoragePort, EngineHandle, EngineStatusHandler, GenerateSpeechHandler, ListVoicesHandler,
    ModelConfigHandler, ModelSettings, TempoAdjusterPort,
};
use crate::config::AppConfig;

/// 应用状态
pub struct AppState {
    pub config: AppConfig,

    // ========== Ports ==========
    pub engine: Arc<EngineHandle>,
    pub storage: Arc<dyn AudioStoragePort>,

    // ========== Command Handlers ==========
    pub generate_handler: GenerateSpeechHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub status_handler: EngineStatusHandler,
    pub model_config_handler: ModelConfigHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        config: AppConfig,
        engine: Arc<EngineHandle>,
        storage: Arc<dyn AudioStoragePort>,
        tempo_adjuster: Arc<dyn TempoAdjusterPort>,
    ) -> Self {
        let settings = ModelSettings {
            model_repo: config.engine.model_repo.clone(),
            model_revision: config.engine.model_revision.clone(),
            cache_dir: config.engine.expanded_cache_dir(),
            fallback_voice: config.engine.fallback_voice.clone(),
            default_steps: config.engine.default_steps,
        };

        Self {
            generate_handler: GenerateSpeechHandler::new(
                engine.clone(),
                storage.clone(),
                tempo_adjuster,
                config.engine.fallback_voice.clone(),
                config.engine.max_attempts,
            ),
            list_voices_handler: ListVoicesHandler::new(engine.clone()),
            status_handler: EngineStatusHandler::new(engine.clone(), config.engine.url.clone()),
            model_config_handler: ModelConfigHandler::new(engine.clone(), settings),
            engine,
            storage,
            config,
        }
    }
}
