use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// 上传文件存储目录
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

/// 生成落盘文件名: `<字段名>-<毫秒时间戳>[-<序号>]<扩展名>`
pub fn stored_file_name(field_name: &str, original_name: Option<&str>, millis: i64, seq: u32) -> String {
    let ext = original_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", sanitize(e)))
        .unwrap_or_default();
    let field = match sanitize(field_name) {
        f if f.is_empty() => "file".to_string(),
        f => f,
    };

    if seq == 0 {
        format!("{}-{}{}", field, millis, ext)
    } else {
        format!("{}-{}-{}{}", field, millis, seq, ext)
    }
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// 保存上传内容, 返回落盘文件名
    pub async fn save(&self, field_name: &str, original_name: Option<&str>, bytes: &[u8]) -> io::Result<String> {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut seq = 0;
        loop {
            let name = stored_file_name(field_name, original_name, millis, seq);
            let open = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&name))
                .await;
            match open {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    tracing::debug!("Stored upload {} ({} bytes)", name, bytes.len());
                    return Ok(name);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => seq += 1,
                Err(e) => return Err(e),
            }
        }
    }

    /// 删除已保存的文件
    pub async fn remove(&self, stored_name: &str) -> io::Result<()> {
        if stored_name.is_empty()
            || stored_name.contains(|c: char| c == '/' || c == '\\')
            || stored_name.contains("..")
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid stored file name: {}", stored_name),
            ));
        }
        fs::remove_file(self.dir.join(stored_name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_keeps_field_and_extension() {
        assert_eq!(
            stored_file_name("npwp_file", Some("NPWP PT Maju.pdf"), 1700000000000, 0),
            "npwp_file-1700000000000.pdf"
        );
        assert_eq!(
            stored_file_name("attachments", None, 42, 0),
            "attachments-42"
        );
        assert_eq!(
            stored_file_name("attachments", Some("scan.jpeg"), 42, 2),
            "attachments-42-2.jpeg"
        );
    }

    #[test]
    fn stored_name_strips_path_characters() {
        let name = stored_file_name("../etc", Some("x.p/df"), 1, 0);
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
        assert_eq!(stored_file_name("", Some("a.pdf"), 1, 0), "file-1.pdf");
    }

    #[tokio::test]
    async fn save_then_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("uploads"));
        store.ensure_dir().await.unwrap();

        let first = store.save("nib_file", Some("nib.pdf"), b"%PDF-1.4").await.unwrap();
        let second = store.save("nib_file", Some("nib.pdf"), b"%PDF-1.5").await.unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("nib_file-") && first.ends_with(".pdf"));

        let content = tokio::fs::read(store.dir().join(&first)).await.unwrap();
        assert_eq!(content, b"%PDF-1.4");

        store.remove(&first).await.unwrap();
        assert!(!store.dir().join(&first).exists());
        assert!(store.dir().join(&second).exists());
    }

    #[tokio::test]
    async fn remove_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());
        let err = store.remove("../secret").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
