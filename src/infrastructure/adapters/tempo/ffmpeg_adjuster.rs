//! FFmpeg Tempo Adjuster - 外部编码器变速实现
//!
//! 实现 TempoAdjusterPort trait，调用 ffmpeg 的 atempo 滤镜
//! 做变速不变调处理。写到临时文件后原子替换原文件。
//!
//! 命令形如:
//! ffmpeg -y -i in.wav -af atempo=1.25 in.wav.tmp.wav

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::application::ports::{TempoAdjusterPort, TempoError};
use crate::domain::speed;

/// FFmpeg 变速适配器
pub struct FfmpegTempoAdjuster {
    /// ffmpeg 可执行文件路径
    binary: String,
}

impl FfmpegTempoAdjuster {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// 构造 atempo 滤镜串，极端倍率拆成多级
    fn filter_arg(factor: f32) -> String {
        speed::atempo_passes(factor)
            .iter()
            .map(|p| format!("atempo={p}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp.wav");
        PathBuf::from(name)
    }
}

#[async_trait]
impl TempoAdjusterPort for FfmpegTempoAdjuster {
    async fn adjust(&self, path: &Path, factor: f32) -> Result<(), TempoError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(TempoError::InvalidFactor(factor));
        }

        let filter = Self::filter_arg(factor);
        let temp_output = Self::temp_path(path);

        tracing::info!(
            file = %path.display(),
            factor,
            filter = %filter,
            "Applying tempo adjustment"
        );

        let output = Command::new(&self.binary)
            .arg("-y")
            .arg("-i")
            .arg(path)
            .arg("-af")
            .arg(&filter)
            .arg(&temp_output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TempoError::EncoderNotFound(self.binary.clone())
                } else {
                    TempoError::IoError(e.to_string())
                }
            })?;

        if !output.status.success() {
            // 清理残留的临时文件
            let _ = tokio::fs::remove_file(&temp_output).await;
            return Err(TempoError::EncoderFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr)
                    .lines()
                    .last()
                    .unwrap_or_default()
                    .to_string(),
            });
        }

        tokio::fs::rename(&temp_output, path)
            .await
            .map_err(|e| TempoError::IoError(e.to_string()))?;

        tracing::debug!(file = %path.display(), "Tempo adjustment written");
        Ok(())
    }
}
