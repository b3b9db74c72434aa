use crate::db::queries_procurement;
use crate::error::{AppError, AppResult};
use crate::models::{InvoiceDetail, InvoiceInput};
use bigdecimal::{BigDecimal, Zero};
use sqlx::PgPool;

/// 请求体校验: 开票比例 0–100, PO 编号必填
///
/// 计算函数本身不做校验, 越界的比例在这里被拒绝。
pub fn validate_invoice_input(input: &InvoiceInput) -> AppResult<()> {
    if input.no_po.trim().is_empty() {
        return Err(AppError::validation("no_po wajib diisi"));
    }
    let portion = &input.invoice_portion_percent;
    if *portion < BigDecimal::zero() || *portion > BigDecimal::from(100) {
        return Err(AppError::validation(format!(
            "invoice_portion_percent harus di antara 0 dan 100, diterima {}",
            portion
        )));
    }
    Ok(())
}

/// 发票服务: 每次读取都重新计算派生金额
pub struct InvoiceService {
    pool: PgPool,
}

impl InvoiceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<InvoiceDetail>> {
        let rows = queries_procurement::list_invoices(&self.pool).await?;
        Ok(rows.into_iter().map(|row| row.with_details()).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<InvoiceDetail> {
        queries_procurement::get_invoice(&self.pool, id)
            .await?
            .map(|row| row.with_details())
            .ok_or_else(|| AppError::not_found("Invoice tidak ditemukan"))
    }

    pub async fn create(&self, input: &InvoiceInput) -> AppResult<InvoiceDetail> {
        validate_invoice_input(input)?;
        self.ensure_purchase_order(&input.no_po).await?;

        let row = queries_procurement::insert_invoice(&self.pool, input).await?;
        tracing::info!("Invoice {} created for PO {}", row.id_invoice, row.no_po);
        Ok(row.with_details())
    }

    pub async fn update(&self, id: i32, input: &InvoiceInput) -> AppResult<InvoiceDetail> {
        validate_invoice_input(input)?;
        self.ensure_purchase_order(&input.no_po).await?;

        let row = queries_procurement::update_invoice(&self.pool, id, input)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice tidak ditemukan"))?;
        tracing::info!("Invoice {} updated", id);
        Ok(row.with_details())
    }

    async fn ensure_purchase_order(&self, no_po: &str) -> AppResult<()> {
        match queries_procurement::purchase_order_nominal(&self.pool, no_po).await? {
            Some(_) => Ok(()),
            None => Err(AppError::validation(format!("PO {} tidak ditemukan", no_po))),
        }
    }
}
