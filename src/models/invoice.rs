use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

/// 发票行 (invoice JOIN purchase_order, nominal_po 取自关联 PO 的当前值)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub id_invoice: i32,
    pub no_po: String,
    pub no_invoice: Option<String>,
    pub status_invoice: Option<String>,
    pub termin: Option<i32>,
    pub invoice_portion_percent: BigDecimal,
    pub ppn_status: Option<String>,
    pub nominal_po: BigDecimal,
}

/// 发票 + 派生金额 (每次读取时重新计算, 不落库)
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: InvoiceRow,
    #[serde(serialize_with = "amount_as_number")]
    pub dpp: BigDecimal,
    #[serde(serialize_with = "amount_as_number")]
    pub ppn: BigDecimal,
    #[serde(serialize_with = "amount_as_number")]
    pub pph: BigDecimal,
    #[serde(serialize_with = "amount_as_number")]
    pub grand_total: BigDecimal,
}

/// 派生金额输出为 JSON 数字 (前端直接参与运算); 精确值保留在导出文件中
fn amount_as_number<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    match value.to_f64() {
        Some(number) if number.is_finite() => serializer.serialize_f64(number),
        _ => serializer.serialize_str(&value.to_string()),
    }
}

/// 新建/修改发票的请求体
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceInput {
    pub no_po: String,
    pub no_invoice: Option<String>,
    pub status_invoice: Option<String>,
    pub termin: Option<i32>,
    pub invoice_portion_percent: BigDecimal,
    pub ppn_status: Option<String>,
}
