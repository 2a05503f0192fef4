//! Generate Handler - 语音生成

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateSpeechCommand;
use crate::infrastructure::http::dto::{ApiResponse, GenerateRequest, GenerateResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<GenerateResponse>>, ApiError> {
    let cmd = GenerateSpeechCommand {
        text: req.text,
        voice: req.voice,
        speed: req.speed,
        pitch: req.pitch,
        steps: req.steps.unwrap_or(state.config.engine.default_steps),
    };

    let result = state.generate_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(GenerateResponse {
        url: result.url,
        filename: result.filename,
        voice: result.voice,
        duration_ms: result.duration_ms,
        latency_ms: result.latency_ms,
    })))
}
