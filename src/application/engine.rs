//! Engine Handle - 惰性初始化的引擎句柄
//!
//! 启动时不触碰引擎；第一个需要音色列表的请求触发初始化，
//! 音色列表只拉取一次并缓存。初始化失败不会污染缓存，
//! 下一个请求会重新尝试。

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::application::ports::{
    EngineError, ModelInfo, SynthesisOutput, SynthesisRequest, TtsEnginePort,
};

/// 惰性引擎句柄
pub struct EngineHandle {
    inner: Arc<dyn TtsEnginePort>,
    voices: OnceCell<Vec<String>>,
}

impl EngineHandle {
    pub fn new(inner: Arc<dyn TtsEnginePort>) -> Self {
        Self {
            inner,
            voices: OnceCell::new(),
        }
    }

    /// 获取音色列表，首次调用触发引擎初始化
    pub async fn voices(&self) -> Result<&[String], EngineError> {
        let voices = self
            .voices
            .get_or_try_init(|| async {
                let names = self.inner.voice_names().await?;
                tracing::info!(voices = ?names, "TTS engine initialized");
                Ok::<_, EngineError>(names)
            })
            .await?;
        Ok(voices.as_slice())
    }

    /// 引擎是否已完成初始化（不触发初始化）
    pub fn is_initialized(&self) -> bool {
        self.voices.initialized()
    }

    /// 已缓存的音色列表（不触发初始化）
    pub fn cached_voices(&self) -> Option<&[String]> {
        self.voices.get().map(|v| v.as_slice())
    }

    /// 执行合成
    pub async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisOutput, EngineError> {
        self.inner.synthesize(request).await
    }

    /// 引擎模型信息
    pub async fn model_info(&self) -> Result<ModelInfo, EngineError> {
        self.inner.model_info().await
    }

    /// 引擎健康探测
    pub async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// 记录调用次数的引擎桩
    struct CountingEngine {
        calls: AtomicU32,
        fail_first: bool,
    }

    #[async_trait]
    impl TtsEnginePort for CountingEngine {
        async fn synthesize(
            &self,
            _request: SynthesisRequest,
        ) -> Result<SynthesisOutput, EngineError> {
            unimplemented!("not used in these tests")
        }

        async fn voice_names(&self) -> Result<Vec<String>, EngineError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && n == 0 {
                return Err(EngineError::Unavailable("cold start".to_string()));
            }
            Ok(vec!["M1".to_string(), "F1".to_string()])
        }

        async fn model_info(&self) -> Result<ModelInfo, EngineError> {
            unimplemented!("not used in these tests")
        }
    }

    #[tokio::test]
    async fn test_voices_fetched_once() {
        let engine = Arc::new(CountingEngine {
            calls: AtomicU32::new(0),
            fail_first: false,
        });
        let handle = EngineHandle::new(engine.clone());

        assert!(!handle.is_initialized());
        assert_eq!(handle.voices().await.unwrap(), ["M1", "F1"]);
        assert_eq!(handle.voices().await.unwrap(), ["M1", "F1"]);
        assert!(handle.is_initialized());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_init_retries_on_next_call() {
        let engine = Arc::new(CountingEngine {
            calls: AtomicU32::new(0),
            fail_first: true,
        });
        let handle = EngineHandle::new(engine.clone());

        assert!(handle.voices().await.is_err());
        assert!(!handle.is_initialized());

        // 第二次调用重新初始化并成功
        assert_eq!(handle.voices().await.unwrap(), ["M1", "F1"]);
        assert!(handle.is_initialized());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
    }
}
