use crate::models::Attachment;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 采购订单表 (purchase_order)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub no_po: String,
    pub id_vendor: Option<i32>,
    pub id_client: Option<i32>,
    pub no_memo: Option<String>,
    pub nominal: BigDecimal,
    pub perihal_project: Option<String>,
    pub tanggal_po: Option<NaiveDate>,
    pub status_po: Option<String>,
}

/// PO 列表行 (带供应商/客户名称)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PurchaseOrderListRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub po: PurchaseOrder,
    pub nama_vendor: Option<String>,
    pub nama_client: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderDetail {
    #[serde(flatten)]
    pub po: PurchaseOrder,
    pub attachments: Vec<Attachment>,
}

/// PO 表单字段; None 表示沿用旧值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseOrderFields {
    pub id_vendor: Option<i32>,
    pub id_client: Option<i32>,
    pub no_memo: Option<String>,
    pub nominal: Option<BigDecimal>,
    pub perihal_project: Option<String>,
    pub tanggal_po: Option<NaiveDate>,
    pub status_po: Option<String>,
}

/// 采购备忘录表 (memo_procurement)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Memo {
    pub no_memo: String,
    pub id_client: Option<i32>,
    pub perihal: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemoListRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub memo: Memo,
    pub nama_brand: Option<String>,
    pub nama_pt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoDetail {
    #[serde(flatten)]
    pub memo: Memo,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoFields {
    pub id_client: Option<i32>,
    pub perihal: Option<String>,
}
