use crate::models::Attachment;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 供应商表 (vendor)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Vendor {
    pub id_vendor: i32,
    pub nama_pt_cv: Option<String>,
    pub nama_vendor: Option<String>,
    pub id_kategori: Option<i32>,
    pub alamat: Option<String>,
    pub no_pic: Option<String>,
    pub nama_pic: Option<String>,
    pub status_verifikasi: String,
}

/// 供应商列表行 (带分类名称)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VendorListRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vendor: Vendor,
    pub nama_kategori: Option<String>,
}

/// 供应商详情 (带附件)
#[derive(Debug, Clone, Serialize)]
pub struct VendorDetail {
    #[serde(flatten)]
    pub vendor: Vendor,
    pub attachments: Vec<Attachment>,
}

/// 供应商表单字段; None 表示沿用旧值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorFields {
    pub nama_pt_cv: Option<String>,
    pub nama_vendor: Option<String>,
    pub id_kategori: Option<i32>,
    pub alamat: Option<String>,
    pub no_pic: Option<String>,
    pub nama_pic: Option<String>,
}

/// 验证状态查询结果
#[derive(Debug, Clone, Serialize)]
pub struct VendorVerificationReport {
    pub id_vendor: i32,
    pub status_verifikasi: String,
    pub missing_documents: Vec<String>,
}
