//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait，生成的音频落在输出目录下，
//! 文件名形如 `tts_<hex>.wav`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{AudioStoragePort, StorageError, StoredAudio};

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 输出目录
    output_dir: PathBuf,
    /// URL 路径前缀（如 "/output"）
    public_path: String,
    /// 拼接绝对 URL 用的 Base URL
    base_url: Option<String>,
}

impl FileAudioStorage {
    /// 创建新的文件存储
    pub async fn new(
        output_dir: impl AsRef<Path>,
        public_path: impl Into<String>,
        base_url: Option<String>,
    ) -> Result<Self, StorageError> {
        let output_dir = output_dir.as_ref().to_path_buf();

        fs::create_dir_all(&output_dir)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        Ok(Self {
            output_dir,
            public_path: public_path.into().trim_end_matches('/').to_string(),
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
        })
    }

    /// 输出目录
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 生成唯一输出文件名
    fn generate_filename() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("tts_{}.wav", &hex[..8])
    }

    /// 校验文件名不会逃出输出目录
    fn validate_filename(filename: &str) -> Result<(), StorageError> {
        let valid = !filename.is_empty()
            && !filename.contains('/')
            && !filename.contains('\\')
            && !filename.contains("..")
            && filename.ends_with(".wav");
        if valid {
            Ok(())
        } else {
            Err(StorageError::InvalidFilename(filename.to_string()))
        }
    }
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    async fn save(&self, data: &[u8]) -> Result<StoredAudio, StorageError> {
        let filename = Self::generate_filename();
        let path = self.output_dir.join(&filename);

        fs::write(&path, data)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        tracing::debug!(file = %filename, size = data.len(), "Saved audio");

        Ok(StoredAudio {
            url: self.public_url(&filename),
            filename,
            path,
        })
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf, StorageError> {
        Self::validate_filename(filename)?;

        let path = self.output_dir.join(filename);
        if !path.exists() {
            return Err(StorageError::FileNotFound(filename.to_string()));
        }
        Ok(path)
    }

    async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(filename)?;
        fs::read(&path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn public_url(&self, filename: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}/{}", base, self.public_path, filename),
            None => format!("{}/{}", self.public_path, filename),
        }
    }
}
