//! Fake Engine Client - 用于测试的引擎实现
//!
//! 不触碰网络，返回内存中生成的合法 WAV；
//! 可配置音色列表与被拒绝的字符，用来驱动剔除重试逻辑

use async_trait::async_trait;
use std::io::Cursor;

use crate::application::ports::{
    EngineError, ModelInfo, SynthesisOutput, SynthesisRequest, TtsEnginePort,
};

/// Fake 引擎配置
#[derive(Debug, Clone)]
pub struct FakeEngineConfig {
    /// 报告的音色列表
    pub voices: Vec<String>,
    /// 合成时会被拒绝的字符
    pub reject_chars: Vec<char>,
    /// 报告的音频时长（毫秒）
    pub duration_ms: u64,
    /// 采样率
    pub sample_rate: u32,
}

impl Default for FakeEngineConfig {
    fn default() -> Self {
        Self {
            voices: vec!["M1".to_string(), "M2".to_string(), "F1".to_string()],
            reject_chars: Vec::new(),
            duration_ms: 500,
            sample_rate: 44100,
        }
    }
}

/// Fake 引擎客户端
pub struct FakeEngineClient {
    config: FakeEngineConfig,
}

impl FakeEngineClient {
    pub fn new(config: FakeEngineConfig) -> Self {
        tracing::info!(voices = ?config.voices, "FakeEngineClient initialized");
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeEngineConfig::default())
    }

    /// 生成一段与配置时长匹配的静音 WAV
    fn make_wav(&self) -> Result<Vec<u8>, EngineError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.config.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let samples = self.config.sample_rate as u64 * self.config.duration_ms / 1000;

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| EngineError::ServiceError(e.to_string()))?;
            for _ in 0..samples {
                writer
                    .write_sample(0i16)
                    .map_err(|e| EngineError::ServiceError(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| EngineError::ServiceError(e.to_string()))?;
        }
        Ok(cursor.into_inner())
    }
}

#[async_trait]
impl TtsEnginePort for FakeEngineClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisOutput, EngineError> {
        let rejected: Vec<String> = self
            .config
            .reject_chars
            .iter()
            .filter(|c| request.text.contains(**c))
            .map(|c| c.to_string())
            .collect();

        if !rejected.is_empty() {
            return Err(EngineError::UnsupportedCharacters {
                message: format!(
                    "Found {} unsupported character(s): {:?}",
                    rejected.len(),
                    rejected
                ),
                chars: rejected,
            });
        }

        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            "FakeEngineClient: returning generated audio"
        );

        Ok(SynthesisOutput {
            audio_data: self.make_wav()?,
            duration_ms: Some(self.config.duration_ms),
            sample_rate: Some(self.config.sample_rate),
        })
    }

    async fn voice_names(&self) -> Result<Vec<String>, EngineError> {
        Ok(self.config.voices.clone())
    }

    async fn model_info(&self) -> Result<ModelInfo, EngineError> {
        Ok(ModelInfo {
            repo: "fake/engine".to_string(),
            revision: "main".to_string(),
            sample_rate: Some(self.config.sample_rate),
        })
    }

    async fn health_check(&self) -> bool {
        true
    }
}
