//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Generate DTOs
// ============================================================================

fn default_speed() -> f32 {
    1.0
}

fn default_pitch() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    /// 扩散步数，缺省时用配置的默认值
    #[serde(default)]
    pub steps: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub url: String,
    pub filename: String,
    pub voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub latency_ms: u64,
}

// ============================================================================
// Voices / Status / Model Config DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub initialized: bool,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_count: Option<usize>,
    pub engine_url: String,
    pub uptime_secs: i64,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelConfigResponse {
    pub model_repo: String,
    pub model_revision: String,
    pub cache_dir: String,
    pub fallback_voice: String,
    pub default_steps: u32,
    pub native_speed_min: f32,
    pub native_speed_max: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
}

// ============================================================================
// Log DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    /// 返回的行数（末尾 N 行）
    #[serde(default)]
    pub lines: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub lines: Vec<String>,
}
