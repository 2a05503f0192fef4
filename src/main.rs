//! ttsd - Supertonic TTS HTTP 网关
//!
//! 组装: 配置 → 日志 → 适配器 → 应用状态 → HTTP 服务器

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ttsd::application::EngineHandle;
use ttsd::config::{load_config, print_config, AppConfig};
use ttsd::infrastructure::adapters::{
    FfmpegTempoAdjuster, FileAudioStorage, HttpEngineClient, HttpEngineClientConfig,
};
use ttsd::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config)?;

    tracing::info!("ttsd - Supertonic TTS gateway");
    print_config(&config);

    // 确保输出目录存在
    tokio::fs::create_dir_all(&config.storage.output_dir).await?;

    // 引擎 HTTP 客户端（惰性初始化，启动时不触碰引擎）
    let engine_config = HttpEngineClientConfig::new(config.engine.url.clone())
        .with_timeout(config.engine.timeout_secs);
    let engine_client = Arc::new(HttpEngineClient::new(engine_config)?);
    let engine = Arc::new(EngineHandle::new(engine_client));

    // 文件存储
    let storage = Arc::new(
        FileAudioStorage::new(
            &config.storage.output_dir,
            config.storage.public_path.clone(),
            config.server.base_url.clone(),
        )
        .await?,
    );

    // ffmpeg 变速后处理
    let tempo_adjuster = Arc::new(FfmpegTempoAdjuster::new(config.encoder.binary.clone()));

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(config, engine, storage, tempo_adjuster);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志
///
/// 配置了 log.file 时同时写入文件（供日志接口读取）
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let log_filter = format!(
        "{},ttsd={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    if let Some(path) = &config.log.file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
            .init();
    } else {
        registry.init();
    }

    Ok(())
}
