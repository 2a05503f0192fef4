//! Generate Speech Command - 语音生成用例
//!
//! 核心流程：校验 → NFC 规范化 → 语速规划 → 音色解析 →
//! 带剔除重试的合成循环 → 落盘 → 可选的外部变速后处理

use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use crate::application::engine::EngineHandle;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStoragePort, EngineError, SynthesisOutput, SynthesisRequest, TempoAdjusterPort,
};
use crate::domain::{speed, text};

/// 语音生成命令
#[derive(Debug, Clone)]
pub struct GenerateSpeechCommand {
    pub text: String,
    pub voice: Option<String>,
    pub speed: f32,
    pub pitch: f32,
    pub steps: u32,
}

/// 语音生成结果
#[derive(Debug, Clone)]
pub struct GenerateSpeechResponse {
    pub filename: String,
    pub url: String,
    pub voice: String,
    /// 音频时长（毫秒），引擎与 WAV 头都未提供时为 None
    pub duration_ms: Option<u64>,
    /// 合成耗时（毫秒，墙钟）
    pub latency_ms: u64,
}

/// GenerateSpeech Handler
pub struct GenerateSpeechHandler {
    engine: Arc<EngineHandle>,
    storage: Arc<dyn AudioStoragePort>,
    tempo_adjuster: Arc<dyn TempoAdjusterPort>,
    /// 引擎音色列表为空时使用的兜底音色
    fallback_voice: String,
    /// 合成尝试次数上限（含首次）
    max_attempts: u32,
}

impl GenerateSpeechHandler {
    pub fn new(
        engine: Arc<EngineHandle>,
        storage: Arc<dyn AudioStoragePort>,
        tempo_adjuster: Arc<dyn TempoAdjusterPort>,
        fallback_voice: impl Into<String>,
        max_attempts: u32,
    ) -> Self {
        Self {
            engine,
            storage,
            tempo_adjuster,
            fallback_voice: fallback_voice.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub async fn handle(
        &self,
        command: GenerateSpeechCommand,
    ) -> Result<GenerateSpeechResponse, ApplicationError> {
        if text::is_effectively_empty(&command.text) {
            return Err(ApplicationError::validation("Text is empty"));
        }

        // macOS NFD 输入修正，引擎要求组合形
        let mut input = text::normalize_nfc(&command.text);

        let plan = speed::plan_speed(command.speed)
            .map_err(|e| ApplicationError::validation(e.to_string()))?;
        if let Some(factor) = plan.post_tempo {
            tracing::info!(
                requested = command.speed,
                factor,
                "Speed outside native range ({}-{}), will post-process with encoder",
                speed::NATIVE_SPEED_MIN,
                speed::NATIVE_SPEED_MAX,
            );
        }

        let voice = self.resolve_voice(command.voice.as_deref()).await?;

        tracing::info!(
            voice = %voice,
            engine_speed = plan.engine_speed,
            steps = command.steps,
            text_chars = input.chars().count(),
            "Generating speech"
        );

        let started = Instant::now();
        let output = self
            .synthesize_with_retry(&mut input, &voice, &plan, &command)
            .await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let mut duration_ms = output
            .duration_ms
            .or_else(|| wav_duration_ms(&output.audio_data));

        let stored = self.storage.save(&output.audio_data).await?;

        // 变速失败不是致命错误：记录并继续返回未调速的音频
        if let Some(factor) = plan.post_tempo {
            match self.tempo_adjuster.adjust(&stored.path, factor).await {
                Ok(()) => {
                    duration_ms = duration_ms.map(|d| (d as f64 / factor as f64).round() as u64);
                    tracing::info!(factor, file = %stored.filename, "Tempo adjustment applied");
                }
                Err(err) => {
                    tracing::error!(
                        error = %err,
                        file = %stored.filename,
                        "Tempo adjustment failed, serving unadjusted audio"
                    );
                }
            }
        }

        tracing::info!(
            file = %stored.filename,
            latency_ms,
            duration_ms = ?duration_ms,
            "Speech generated"
        );

        Ok(GenerateSpeechResponse {
            filename: stored.filename,
            url: stored.url,
            voice,
            duration_ms,
            latency_ms,
        })
    }

    /// 解析音色：请求的音色若引擎认识则用之，否则依次回退到
    /// 引擎列表的第一个、配置的兜底音色
    async fn resolve_voice(&self, requested: Option<&str>) -> Result<String, ApplicationError> {
        let voices = self.engine.voices().await?;

        if let Some(name) = requested {
            if voices.iter().any(|v| v == name) {
                return Ok(name.to_string());
            }
            tracing::warn!(voice = %name, "Unknown voice requested, falling back");
        }

        Ok(voices
            .first()
            .cloned()
            .unwrap_or_else(|| self.fallback_voice.clone()))
    }

    /// 带不支持字符剔除的合成循环
    ///
    /// 引擎点名拒绝字符时剔除后重试；剔空文本即失败；
    /// 尝试次数耗尽时把引擎的失败原样上抛
    async fn synthesize_with_retry(
        &self,
        input: &mut String,
        voice: &str,
        plan: &speed::SpeedPlan,
        command: &GenerateSpeechCommand,
    ) -> Result<SynthesisOutput, ApplicationError> {
        let mut attempt = 0u32;
        loop {
            let request = SynthesisRequest {
                text: input.clone(),
                voice: voice.to_string(),
                speed: plan.engine_speed,
                pitch: command.pitch,
                steps: command.steps,
            };

            match self.engine.synthesize(request).await {
                Ok(output) => return Ok(output),
                Err(EngineError::UnsupportedCharacters { chars, message })
                    if attempt + 1 < self.max_attempts =>
                {
                    tracing::warn!(
                        attempt,
                        chars = ?chars,
                        engine_message = %message,
                        "Engine rejected characters, stripping and retrying"
                    );
                    *input = text::strip_characters(input, &chars);
                    if text::is_effectively_empty(input) {
                        return Err(ApplicationError::validation(
                            "Text became empty after removing unsupported characters",
                        ));
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// 从 WAV 头计算时长（毫秒），引擎未报告时长时兜底
fn wav_duration_ms(data: &[u8]) -> Option<u64> {
    let reader = hound::WavReader::new(Cursor::new(data)).ok()?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return None;
    }
    Some(u64::from(reader.duration()) * 1000 / u64::from(spec.sample_rate))
}
