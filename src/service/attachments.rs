use crate::db::queries_vendor;
use crate::error::{AppError, AppResult};
use crate::models::{AttachmentOwner, StoredFile, UploadedFile};
use crate::service::vendor_service::reverify_vendor;
use crate::service::RequiredDocumentSet;
use crate::storage::UploadStore;
use sqlx::{PgConnection, PgPool};

/// 先落盘, 失败时清理已保存的文件
pub async fn persist_uploads(store: &UploadStore, files: &[UploadedFile]) -> AppResult<Vec<StoredFile>> {
    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        match store.save(&file.field_name, file.file_name.as_deref(), &file.bytes).await {
            Ok(file_path) => stored.push(StoredFile {
                file_path,
                document_type: file.document_type(),
            }),
            Err(e) => {
                discard_uploads(store, &stored).await;
                return Err(AppError::Storage(e));
            }
        }
    }
    Ok(stored)
}

/// 事务回滚后删除对应文件 (失败只记录日志)
pub async fn discard_uploads(store: &UploadStore, stored: &[StoredFile]) {
    for file in stored {
        if let Err(e) = store.remove(&file.file_path).await {
            tracing::error!("Failed to discard upload {}: {}", file.file_path, e);
        }
    }
}

/// 在事务内写入附件记录
pub async fn record_attachments(
    conn: &mut PgConnection,
    owner: &AttachmentOwner,
    stored: &[StoredFile],
) -> Result<(), sqlx::Error> {
    for file in stored {
        queries_vendor::insert_attachment(&mut *conn, owner, file).await?;
    }
    Ok(())
}

/// 附件服务 (删除)
pub struct AttachmentService {
    pool: PgPool,
    uploads: UploadStore,
    required: RequiredDocumentSet,
}

impl AttachmentService {
    pub fn new(pool: PgPool, uploads: UploadStore, required: RequiredDocumentSet) -> Self {
        Self {
            pool,
            uploads,
            required,
        }
    }

    /// 删除附件; 供应商附件删除后重新计算验证状态
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let Some(record) = queries_vendor::lock_attachment(&mut *tx, id).await? else {
            return Err(AppError::not_found("Attachment tidak ditemukan."));
        };
        queries_vendor::delete_attachment(&mut *tx, id).await?;

        if let Some(vendor_id) = record.vendor_id() {
            if queries_vendor::lock_vendor(&mut *tx, vendor_id).await?.is_some() {
                reverify_vendor(&mut *tx, vendor_id, &self.required).await?;
            }
        }
        tx.commit().await?;

        match self.uploads.remove(&record.file_path).await {
            Ok(()) => tracing::info!("Removed upload {}", record.file_path),
            Err(e) => tracing::error!("Failed to remove upload {}: {}", record.file_path, e),
        }
        Ok(())
    }
}
