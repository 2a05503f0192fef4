//! Log Handler - 读取服务日志尾部

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, LogQuery, LogResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 默认返回的行数
const DEFAULT_TAIL_LINES: usize = 200;
/// 单次请求最多返回的行数
const MAX_TAIL_LINES: usize = 2000;

/// 返回日志文件的末尾 N 行
///
/// 未配置 `log.file` 时返回 NotFound
pub async fn get_log(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> Result<Json<ApiResponse<LogResponse>>, ApiError> {
    let path = state
        .config
        .log
        .file
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("log file is not configured".to_string()))?;

    if !path.exists() {
        return Err(ApiError::NotFound("log file does not exist".to_string()));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read log file: {}", e)))?;

    let requested = query
        .lines
        .unwrap_or(DEFAULT_TAIL_LINES)
        .min(MAX_TAIL_LINES);
    let lines = tail_lines(&content, requested);

    Ok(Json(ApiResponse::success(LogResponse { lines })))
}

/// 取文本末尾 n 行
fn tail_lines(content: &str, n: usize) -> Vec<String> {
    let all: Vec<&str> = content.lines().collect();
    let start = all.len().saturating_sub(n);
    all[start..].iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_fewer_lines_than_requested() {
        let lines = tail_lines("a\nb\n", 10);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_tail_takes_last_n() {
        let lines = tail_lines("1\n2\n3\n4\n5\n", 2);
        assert_eq!(lines, vec!["4", "5"]);
    }

    #[test]
    fn test_tail_zero() {
        assert!(tail_lines("a\nb\n", 0).is_empty());
    }
}
