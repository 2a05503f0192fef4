//! Engine Info Handlers - 音色 / 状态 / 模型配置

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{
    ApiResponse, ModelConfigResponse, StatusResponse, VoicesResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出引擎音色（首次调用触发引擎初始化）
pub async fn get_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<VoicesResponse>>, ApiError> {
    let voices = state.list_voices_handler.handle().await?;
    Ok(Json(ApiResponse::success(VoicesResponse { voices })))
}

/// 服务与引擎状态
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatusResponse>> {
    let status = state.status_handler.handle().await;
    Json(ApiResponse::success(StatusResponse {
        initialized: status.initialized,
        healthy: status.healthy,
        voice_count: status.voice_count,
        engine_url: status.engine_url,
        uptime_secs: status.uptime_secs,
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// 模型配置
pub async fn get_model_config(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<ModelConfigResponse>> {
    let view = state.model_config_handler.handle().await;
    Json(ApiResponse::success(ModelConfigResponse {
        model_repo: view.model_repo,
        model_revision: view.model_revision,
        cache_dir: view.cache_dir,
        fallback_voice: view.fallback_voice,
        default_steps: view.default_steps,
        native_speed_min: view.native_speed_min,
        native_speed_max: view.native_speed_max,
        sample_rate: view.sample_rate,
    }))
}
