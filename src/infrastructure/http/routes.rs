//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                  GET  健康检查
//! - /api/tts/generate          POST 生成语音
//! - /api/tts/voices            GET  列出引擎音色
//! - /api/tts/status            GET  引擎状态
//! - /api/tts/model_config      GET  模型配置
//! - /api/tts/file/{filename}   GET  读取生成的音频
//! - /api/tts/log               GET  服务日志尾部
//! - {public_path}/{filename}   GET  静态音频托管（ServeDir）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/tts", tts_routes())
}

/// TTS 路由
fn tts_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate))
        .route("/voices", get(handlers::get_voices))
        .route("/status", get(handlers::get_status))
        .route("/model_config", get(handlers::get_model_config))
        .route("/file/:filename", get(handlers::get_file))
        .route("/log", get(handlers::get_log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::EngineHandle;
    use crate::config::AppConfig;
    use crate::infrastructure::adapters::{
        FakeEngineClient, FakeEngineConfig, FfmpegTempoAdjuster, FileAudioStorage,
    };
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    struct TestApp {
        router: Router,
        _dir: TempDir,
    }

    async fn test_app(engine_config: FakeEngineConfig) -> TestApp {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.output_dir = dir.path().to_path_buf();

        let engine = Arc::new(EngineHandle::new(Arc::new(FakeEngineClient::new(
            engine_config,
        ))));
        let storage = Arc::new(
            FileAudioStorage::new(dir.path(), "/output", None)
                .await
                .unwrap(),
        );
        let tempo = Arc::new(FfmpegTempoAdjuster::new("ffmpeg"));

        let state = AppState::new(config, engine, storage, tempo);
        TestApp {
            router: create_routes().with_state(Arc::new(state)),
            _dir: dir,
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = test_app(FakeEngineConfig::default()).await;
        let response = app
            .router
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_voices_endpoint() {
        let app = test_app(FakeEngineConfig::default()).await;
        let response = app
            .router
            .oneshot(
                Request::builder()
                    .uri("/api/tts/voices")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["voices"], json!(["M1", "M2", "F1"]));
    }

    #[tokio::test]
    async fn test_status_reports_uninitialized_engine() {
        let app = test_app(FakeEngineConfig::default()).await;
        let response = app
            .router
            .oneshot(
                Request::builder()
                    .uri("/api/tts/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["errno"], 0);
        // 状态查询本身不得触发引擎初始化
        assert_eq!(body["data"]["initialized"], false);
    }

    #[tokio::test]
    async fn test_model_config_endpoint() {
        let app = test_app(FakeEngineConfig::default()).await;
        let response = app
            .router
            .oneshot(
                Request::builder()
                    .uri("/api/tts/model_config")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["model_repo"], "Supertone/supertonic-2");
        assert_eq!(body["data"]["fallback_voice"], "M1");
    }

    #[tokio::test]
    async fn test_generate_then_fetch_file() {
        let app = test_app(FakeEngineConfig::default()).await;

        let response = app
            .router
            .clone()
            .oneshot(post_json(
                "/api/tts/generate",
                json!({"text": "안녕하세요", "voice": "M2"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["voice"], "M2");
        let filename = body["data"]["filename"].as_str().unwrap().to_string();
        assert!(filename.starts_with("tts_") && filename.ends_with(".wav"));

        // 生成的文件可以通过 file 接口取回
        let response = app
            .router
            .oneshot(
                Request::builder()
                    .uri(format!("/api/tts/file/{}", filename))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "audio/wav"
        );
    }

    #[tokio::test]
    async fn test_generate_empty_text_returns_errno_400() {
        let app = test_app(FakeEngineConfig::default()).await;
        let response = app
            .router
            .oneshot(post_json("/api/tts/generate", json!({"text": "  "})))
            .await
            .unwrap();

        // 约定：HTTP 状态恒 200，错误通过 errno 传递
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_generate_strips_rejected_characters() {
        let app = test_app(FakeEngineConfig {
            reject_chars: vec!['☃'],
            ..Default::default()
        })
        .await;

        let response = app
            .router
            .oneshot(post_json(
                "/api/tts/generate",
                json!({"text": "hello ☃ world"}),
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["duration_ms"], 500);
    }

    #[tokio::test]
    async fn test_file_traversal_rejected() {
        let app = test_app(FakeEngineConfig::default()).await;
        let response = app
            .router
            .oneshot(
                Request::builder()
                    .uri("/api/tts/file/..%2F..%2Fetc%2Fpasswd")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_log_endpoint_without_configured_file() {
        let app = test_app(FakeEngineConfig::default()).await;
        let response = app
            .router
            .oneshot(
                Request::builder()
                    .uri("/api/tts/log")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["errno"], 404);
    }
}
