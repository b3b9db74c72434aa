use crate::db::queries_vendor;
use crate::error::{AppError, AppResult};
use crate::models::{
    AttachmentOwner, StoredFile, UploadedFile, VendorDetail, VendorFields, VendorListRow,
    VendorVerificationReport,
};
use crate::service::attachments::{discard_uploads, persist_uploads, record_attachments};
use crate::service::{RequiredDocumentSet, VerificationStatus};
use crate::storage::UploadStore;
use sqlx::{PgConnection, PgPool};

/// 根据当前附件重新计算并保存供应商验证状态
///
/// 必须在写入附件的同一事务内调用, 读到的是本事务刚写入的数据。
pub async fn reverify_vendor(
    conn: &mut PgConnection,
    vendor_id: i32,
    required: &RequiredDocumentSet,
) -> Result<VerificationStatus, sqlx::Error> {
    let uploaded = queries_vendor::vendor_document_types(&mut *conn, vendor_id).await?;
    let status = required.evaluate(uploaded.iter().map(String::as_str));
    queries_vendor::set_vendor_status(&mut *conn, vendor_id, status.as_db_str()).await?;

    tracing::info!(
        "Vendor {}: {} document type(s) on file, status {}",
        vendor_id,
        uploaded.len(),
        status
    );
    Ok(status)
}

/// 供应商服务
pub struct VendorService {
    pool: PgPool,
    uploads: UploadStore,
    required: RequiredDocumentSet,
}

impl VendorService {
    pub fn new(pool: PgPool, uploads: UploadStore, required: RequiredDocumentSet) -> Self {
        Self {
            pool,
            uploads,
            required,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<VendorListRow>> {
        Ok(queries_vendor::list_vendors(&self.pool).await?)
    }

    pub async fn detail(&self, id: i32) -> AppResult<VendorDetail> {
        let Some(vendor) = queries_vendor::get_vendor(&self.pool, id).await? else {
            return Err(AppError::not_found("Vendor tidak ditemukan"));
        };
        let attachments =
            queries_vendor::list_attachments(&self.pool, &AttachmentOwner::Vendor(id)).await?;
        Ok(VendorDetail {
            vendor,
            attachments,
        })
    }

    /// 新建供应商: 初始为未验证, 写入附件后重新计算
    pub async fn create(
        &self,
        fields: &VendorFields,
        files: &[UploadedFile],
    ) -> AppResult<(i32, VerificationStatus)> {
        let stored = persist_uploads(&self.uploads, files).await?;
        match self.create_in_tx(fields, &stored).await {
            Ok(created) => {
                tracing::info!(
                    "Vendor {} created with {} attachment(s)",
                    created.0,
                    stored.len()
                );
                Ok(created)
            }
            Err(e) => {
                discard_uploads(&self.uploads, &stored).await;
                Err(e)
            }
        }
    }

    async fn create_in_tx(
        &self,
        fields: &VendorFields,
        stored: &[StoredFile],
    ) -> AppResult<(i32, VerificationStatus)> {
        let mut tx = self.pool.begin().await?;

        let id = queries_vendor::insert_vendor(
            &mut *tx,
            fields,
            VerificationStatus::Unverified.as_db_str(),
        )
        .await?;
        record_attachments(&mut *tx, &AttachmentOwner::Vendor(id), stored).await?;
        let status = reverify_vendor(&mut *tx, id, &self.required).await?;

        tx.commit().await?;
        Ok((id, status))
    }

    /// 部分更新并追加附件, 然后重新计算验证状态
    pub async fn update(
        &self,
        id: i32,
        fields: &VendorFields,
        files: &[UploadedFile],
    ) -> AppResult<VerificationStatus> {
        let stored = persist_uploads(&self.uploads, files).await?;
        match self.update_in_tx(id, fields, &stored).await {
            Ok(status) => {
                tracing::info!("Vendor {} updated, {} new attachment(s)", id, stored.len());
                Ok(status)
            }
            Err(e) => {
                discard_uploads(&self.uploads, &stored).await;
                Err(e)
            }
        }
    }

    async fn update_in_tx(
        &self,
        id: i32,
        fields: &VendorFields,
        stored: &[StoredFile],
    ) -> AppResult<VerificationStatus> {
        let mut tx = self.pool.begin().await?;

        if queries_vendor::lock_vendor(&mut *tx, id).await?.is_none() {
            return Err(AppError::not_found("Vendor tidak ditemukan"));
        }
        queries_vendor::update_vendor(&mut *tx, id, fields).await?;
        record_attachments(&mut *tx, &AttachmentOwner::Vendor(id), stored).await?;
        let status = reverify_vendor(&mut *tx, id, &self.required).await?;

        tx.commit().await?;
        Ok(status)
    }

    /// 按当前附件重新计算 (只读, 不落库)
    pub async fn verification_report(&self, id: i32) -> AppResult<VendorVerificationReport> {
        if queries_vendor::get_vendor(&self.pool, id).await?.is_none() {
            return Err(AppError::not_found("Vendor tidak ditemukan"));
        }
        let uploaded = queries_vendor::vendor_document_types(&self.pool, id).await?;
        let status = self.required.evaluate(uploaded.iter().map(String::as_str));
        let missing_documents = self.required.missing(uploaded.iter().map(String::as_str));

        Ok(VendorVerificationReport {
            id_vendor: id,
            status_verifikasi: status.as_db_str().to_string(),
            missing_documents,
        })
    }
}
