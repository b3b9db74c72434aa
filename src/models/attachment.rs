use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 附件列表项 (随主记录一起返回)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Attachment {
    pub id_attachment: i32,
    pub file_path: String,
    pub document_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// 附件完整记录 (删除时需要知道归属)
#[derive(Debug, Clone, FromRow)]
pub struct AttachmentRecord {
    pub id_attachment: i32,
    pub file_path: String,
    pub related_table: String,
    pub related_id_text: Option<String>,
    pub related_id_int: Option<i32>,
}

impl AttachmentRecord {
    /// 所属供应商ID (非供应商附件返回 None)
    pub fn vendor_id(&self) -> Option<i32> {
        match self.related_table.as_str() {
            "vendor" => self.related_id_int,
            _ => None,
        }
    }
}

/// 附件归属: 供应商用整型主键, PO/备忘录用文本编号
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentOwner {
    Vendor(i32),
    PurchaseOrder(String),
    Memo(String),
}

impl AttachmentOwner {
    pub fn related_table(&self) -> &'static str {
        match self {
            Self::Vendor(_) => "vendor",
            Self::PurchaseOrder(_) => "po",
            Self::Memo(_) => "memo",
        }
    }

    pub fn id_text(&self) -> Option<&str> {
        match self {
            Self::Vendor(_) => None,
            Self::PurchaseOrder(no) | Self::Memo(no) => Some(no),
        }
    }

    pub fn id_int(&self) -> Option<i32> {
        match self {
            Self::Vendor(id) => Some(*id),
            _ => None,
        }
    }
}

/// 从表单收到的上传文件
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field_name: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// 文档类型 = 表单字段名 (大写)
    pub fn document_type(&self) -> String {
        self.field_name.trim().to_uppercase()
    }
}

/// 已落盘、待写入附件表的文件
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_path: String,
    pub document_type: String,
}
