//! HTTP Engine Client - 调用 Supertonic 引擎 sidecar
//!
//! 实现 TtsEnginePort trait，通过 HTTP 调用外部引擎服务
//!
//! 引擎 API:
//! POST {base}/api/synthesize  {"text","voice","speed","pitch","steps"} (JSON)
//!   成功: audio/wav binary，元数据在响应头
//!   失败: JSON {"error": "..."}，不支持字符的消息形如
//!         Found N unsupported character(s): ['A', 'B']
//! GET  {base}/api/voices      {"voices": [...]}
//! GET  {base}/api/model       {"repo","revision","sample_rate"}
//! GET  {base}/health

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    EngineError, ModelInfo, SynthesisOutput, SynthesisRequest, TtsEnginePort,
};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SynthesizeHttpRequest<'a> {
    text: &'a str,
    voice: &'a str,
    speed: f32,
    pitch: f32,
    steps: u32,
}

/// 引擎错误响应体
#[derive(Debug, Deserialize)]
struct EngineErrorBody {
    error: String,
}

/// 音色列表响应体
#[derive(Debug, Deserialize)]
struct VoicesBody {
    voices: Vec<String>,
}

/// 模型信息响应体
#[derive(Debug, Deserialize)]
struct ModelBody {
    repo: String,
    revision: String,
    sample_rate: Option<u32>,
}

/// HTTP 引擎客户端配置
#[derive(Debug, Clone)]
pub struct HttpEngineClientConfig {
    /// 引擎服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpEngineClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpEngineClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 引擎客户端
pub struct HttpEngineClient {
    client: Client,
    config: HttpEngineClientConfig,
}

impl HttpEngineClient {
    /// 创建新的引擎客户端
    pub fn new(config: HttpEngineClientConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/api/synthesize", self.config.base_url)
    }

    fn voices_url(&self) -> String {
        format!("{}/api/voices", self.config.base_url)
    }

    fn model_url(&self) -> String {
        format!("{}/api/model", self.config.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }

    fn map_send_error(e: reqwest::Error) -> EngineError {
        if e.is_timeout() {
            EngineError::Timeout
        } else if e.is_connect() {
            EngineError::Unavailable(format!("Cannot connect to engine: {}", e))
        } else {
            EngineError::NetworkError(e.to_string())
        }
    }
}

/// 从引擎错误消息中解析被拒绝的字符
///
/// 消息格式: `Found 2 unsupported character(s): ['A', 'B']`
/// 返回 None 表示这不是不支持字符错误
pub(crate) fn parse_unsupported_chars(message: &str) -> Option<Vec<String>> {
    if !message.contains("unsupported character") {
        return None;
    }
    let start = message.find('[')?;
    let end = message.rfind(']')?;
    if end <= start {
        return None;
    }

    let chars: Vec<String> = message[start + 1..end]
        .split(',')
        .map(|part| part.trim().trim_matches('\'').trim_matches('"').to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if chars.is_empty() {
        None
    } else {
        Some(chars)
    }
}

#[async_trait]
impl TtsEnginePort for HttpEngineClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisOutput, EngineError> {
        let body = SynthesizeHttpRequest {
            text: &request.text,
            voice: &request.voice,
            speed: request.speed,
            pitch: request.pitch,
            steps: request.steps,
        };

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = request.text.len(),
            voice = %request.voice,
            speed = request.speed,
            steps = request.steps,
            "Sending synthesize request"
        );

        let response = self
            .client
            .post(self.synthesize_url())
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .json::<EngineErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP {}", status));

            if let Some(chars) = parse_unsupported_chars(&error_text) {
                return Err(EngineError::UnsupportedCharacters {
                    chars,
                    message: error_text,
                });
            }
            return Err(EngineError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 从响应头提取元数据
        let headers = response.headers();
        let duration_ms = headers
            .get("X-Supertonic-Duration-Ms")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let sample_rate = headers
            .get("X-Supertonic-Sample-Rate")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| EngineError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(
            duration_ms = ?duration_ms,
            sample_rate = ?sample_rate,
            audio_size = audio_data.len(),
            "Synthesis completed"
        );

        Ok(SynthesisOutput {
            audio_data,
            duration_ms,
            sample_rate,
        })
    }

    async fn voice_names(&self) -> Result<Vec<String>, EngineError> {
        let response = self
            .client
            .get(self.voices_url())
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::ServiceError(format!(
                "Voice listing failed: HTTP {}",
                status
            )));
        }

        let body: VoicesBody = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;
        Ok(body.voices)
    }

    async fn model_info(&self) -> Result<ModelInfo, EngineError> {
        let response = self
            .client
            .get(self.model_url())
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::ServiceError(format!(
                "Model info failed: HTTP {}",
                status
            )));
        }

        let body: ModelBody = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;
        Ok(ModelInfo {
            repo: body.repo,
            revision: body.revision,
            sample_rate: body.sample_rate,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
