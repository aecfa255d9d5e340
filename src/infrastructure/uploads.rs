//! 上传文件落盘
//!
//! 原始字节按 `<uuid>-<原文件名>` 写入 uploads 目录；记录里保存的是内存中字节
//! 直接编码出的 data URI。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

/// 一次成功落盘的结果
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub file_name: String,
    pub data_uri: String,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// 写入原始字节并返回文件名和 data URI。写库失败时文件不回收。
    pub async fn persist(&self, original_name: &str, bytes: &[u8]) -> io::Result<StoredUpload> {
        let file_name = stored_file_name(original_name);
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "Upload written");

        let data_uri = data_uri(&file_name, bytes);
        Ok(StoredUpload {
            file_name,
            data_uri,
        })
    }
}

/// `<uuid-v4>-<原文件名最后一段>`，去掉客户端带上来的目录部分
pub fn stored_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or("upload");

    format!("{}-{}", Uuid::new_v4(), base)
}

/// `data:image/<ext>;base64,<payload>`；扩展名不可用时退回 octet-stream
pub fn data_uri(file_name: &str, bytes: &[u8]) -> String {
    let payload = STANDARD.encode(bytes);
    match image_extension(file_name) {
        Some(ext) => format!("data:image/{};base64,{}", ext, payload),
        None => format!("data:application/octet-stream;base64,{}", payload),
    }
}

fn image_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
