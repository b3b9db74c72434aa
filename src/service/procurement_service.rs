use crate::db::{queries_procurement, queries_vendor};
use crate::error::{AppError, AppResult};
use crate::models::{
    AttachmentOwner, MemoDetail, MemoFields, MemoListRow, PurchaseOrderDetail,
    PurchaseOrderFields, PurchaseOrderListRow, StoredFile, UploadedFile,
};
use crate::service::attachments::{discard_uploads, persist_uploads, record_attachments};
use crate::storage::UploadStore;
use bigdecimal::BigDecimal;
use sqlx::PgPool;

/// PO 与采购备忘录服务
pub struct ProcurementService {
    pool: PgPool,
    uploads: UploadStore,
}

impl ProcurementService {
    pub fn new(pool: PgPool, uploads: UploadStore) -> Self {
        Self { pool, uploads }
    }

    pub async fn list_purchase_orders(&self) -> AppResult<Vec<PurchaseOrderListRow>> {
        Ok(queries_procurement::list_purchase_orders(&self.pool).await?)
    }

    pub async fn purchase_order_detail(&self, no_po: &str) -> AppResult<PurchaseOrderDetail> {
        let Some(po) = queries_procurement::get_purchase_order(&self.pool, no_po).await? else {
            return Err(AppError::not_found("PO tidak ditemukan"));
        };
        let owner = AttachmentOwner::PurchaseOrder(no_po.to_string());
        let attachments = queries_vendor::list_attachments(&self.pool, &owner).await?;
        Ok(PurchaseOrderDetail { po, attachments })
    }

    pub async fn create_purchase_order(
        &self,
        no_po: &str,
        nominal: &BigDecimal,
        fields: &PurchaseOrderFields,
        files: &[UploadedFile],
    ) -> AppResult<String> {
        let stored = persist_uploads(&self.uploads, files).await?;
        let result = async {
            let mut tx = self.pool.begin().await?;
            let created =
                queries_procurement::insert_purchase_order(&mut *tx, no_po, nominal, fields).await?;
            let owner = AttachmentOwner::PurchaseOrder(created.clone());
            record_attachments(&mut *tx, &owner, &stored).await?;
            tx.commit().await?;
            Ok::<_, AppError>(created)
        }
        .await;

        self.settle(result, &stored, "PO", no_po).await
    }

    pub async fn update_purchase_order(
        &self,
        no_po: &str,
        fields: &PurchaseOrderFields,
        files: &[UploadedFile],
    ) -> AppResult<()> {
        let stored = persist_uploads(&self.uploads, files).await?;
        let result = async {
            let mut tx = self.pool.begin().await?;
            if queries_procurement::update_purchase_order(&mut *tx, no_po, fields).await? == 0 {
                return Err(AppError::not_found("PO tidak ditemukan"));
            }
            let owner = AttachmentOwner::PurchaseOrder(no_po.to_string());
            record_attachments(&mut *tx, &owner, &stored).await?;
            tx.commit().await?;
            Ok::<_, AppError>(())
        }
        .await;

        self.settle(result, &stored, "PO", no_po).await
    }

    pub async fn list_memos(&self) -> AppResult<Vec<MemoListRow>> {
        Ok(queries_procurement::list_memos(&self.pool).await?)
    }

    pub async fn memo_detail(&self, no_memo: &str) -> AppResult<MemoDetail> {
        let Some(memo) = queries_procurement::get_memo(&self.pool, no_memo).await? else {
            return Err(AppError::not_found("Memo tidak ditemukan"));
        };
        let owner = AttachmentOwner::Memo(no_memo.to_string());
        let attachments = queries_vendor::list_attachments(&self.pool, &owner).await?;
        Ok(MemoDetail { memo, attachments })
    }

    pub async fn create_memo(
        &self,
        no_memo: &str,
        fields: &MemoFields,
        files: &[UploadedFile],
    ) -> AppResult<String> {
        let stored = persist_uploads(&self.uploads, files).await?;
        let result = async {
            let mut tx = self.pool.begin().await?;
            let created = queries_procurement::insert_memo(&mut *tx, no_memo, fields).await?;
            record_attachments(&mut *tx, &AttachmentOwner::Memo(created.clone()), &stored).await?;
            tx.commit().await?;
            Ok::<_, AppError>(created)
        }
        .await;

        self.settle(result, &stored, "Memo", no_memo).await
    }

    pub async fn update_memo(
        &self,
        no_memo: &str,
        fields: &MemoFields,
        files: &[UploadedFile],
    ) -> AppResult<()> {
        let stored = persist_uploads(&self.uploads, files).await?;
        let result = async {
            let mut tx = self.pool.begin().await?;
            if queries_procurement::update_memo(&mut *tx, no_memo, fields).await? == 0 {
                return Err(AppError::not_found("Memo tidak ditemukan"));
            }
            record_attachments(&mut *tx, &AttachmentOwner::Memo(no_memo.to_string()), &stored)
                .await?;
            tx.commit().await?;
            Ok::<_, AppError>(())
        }
        .await;

        self.settle(result, &stored, "Memo", no_memo).await
    }

    /// 失败时清理已落盘的文件
    async fn settle<T>(
        &self,
        result: AppResult<T>,
        stored: &[StoredFile],
        kind: &str,
        key: &str,
    ) -> AppResult<T> {
        match &result {
            Ok(_) => tracing::info!("{} {} saved, {} attachment(s)", kind, key, stored.len()),
            Err(_) => discard_uploads(&self.uploads, stored).await,
        }
        result
    }
}
