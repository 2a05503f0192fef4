//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 引擎专用环境变量（SUPERTONIC_*）
//! 2. 通用环境变量（TTSD_ 前缀）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `TTSD_SERVER__PORT=8080`
/// - `TTSD_ENGINE__URL=http://supertonic:8000`
/// - `TTSD_LOG__FILE=/var/log/ttsd.log`
///
/// 此外兼容原插件的引擎环境变量（优先级最高）：
/// - `SUPERTONIC_MODEL_REPO`
/// - `SUPERTONIC_MODEL_REVISION`
/// - `SUPERTONIC_CACHE_DIR`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 2. 环境变量
    // 前缀: TTSD_，层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("TTSD")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 3. 引擎专用环境变量覆盖（原插件的约定）
    apply_engine_env_overrides(&mut app_config);

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 应用 SUPERTONIC_* 环境变量覆盖
fn apply_engine_env_overrides(config: &mut AppConfig) {
    if let Ok(repo) = std::env::var("SUPERTONIC_MODEL_REPO") {
        if !repo.is_empty() {
            config.engine.model_repo = repo;
        }
    }
    if let Ok(revision) = std::env::var("SUPERTONIC_MODEL_REVISION") {
        if !revision.is_empty() {
            config.engine.model_revision = revision;
        }
    }
    if let Ok(cache_dir) = std::env::var("SUPERTONIC_CACHE_DIR") {
        if !cache_dir.is_empty() {
            config.engine.cache_dir = cache_dir;
        }
    }
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.engine.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Engine URL cannot be empty".to_string(),
        ));
    }

    if config.engine.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "engine.max_attempts must be at least 1".to_string(),
        ));
    }

    if config.engine.default_steps == 0 {
        return Err(ConfigError::ValidationError(
            "engine.default_steps must be at least 1".to_string(),
        ));
    }

    if !config.storage.public_path.starts_with('/') {
        return Err(ConfigError::ValidationError(
            "storage.public_path must start with '/'".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Engine URL: {}", config.engine.url);
    tracing::info!("Engine Timeout: {}s", config.engine.timeout_secs);
    tracing::info!(
        "Model: {} @ {}",
        config.engine.model_repo,
        config.engine.model_revision
    );
    tracing::info!("Model Cache: {}", config.engine.expanded_cache_dir());
    tracing::info!("Output Directory: {:?}", config.storage.output_dir);
    tracing::info!("Public Path: {}", config.storage.public_path);
    tracing::info!("Encoder: {}", config.encoder.binary);
    tracing::info!("Log Level: {}", config.log.level);
    if let Some(file) = &config.log.file {
        tracing::info!("Log File: {:?}", file);
    }
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_passes_for_default_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_engine_url() {
        let mut config = AppConfig::default();
        config.engine.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_attempts() {
        let mut config = AppConfig::default();
        config.engine.max_attempts = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_relative_public_path() {
        let mut config = AppConfig::default();
        config.storage.public_path = "output".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_engine_env_overrides() {
        std::env::set_var("SUPERTONIC_MODEL_REPO", "Supertone/supertonic-test");
        std::env::set_var("SUPERTONIC_MODEL_REVISION", "dev");
        std::env::set_var("SUPERTONIC_CACHE_DIR", "/tmp/st-cache");

        let mut config = AppConfig::default();
        apply_engine_env_overrides(&mut config);

        assert_eq!(config.engine.model_repo, "Supertone/supertonic-test");
        assert_eq!(config.engine.model_revision, "dev");
        assert_eq!(config.engine.cache_dir, "/tmp/st-cache");

        std::env::remove_var("SUPERTONIC_MODEL_REPO");
        std::env::remove_var("SUPERTONIC_MODEL_REVISION");
        std::env::remove_var("SUPERTONIC_CACHE_DIR");
    }
}
