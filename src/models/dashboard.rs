use bigdecimal::BigDecimal;
use serde::Serialize;
use sqlx::FromRow;

/// PO 总数与总金额
#[derive(Debug, Clone, FromRow)]
pub struct PoTotals {
    pub total_po: i64,
    pub total_value: Option<BigDecimal>,
}

/// 最近的 PO
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentPo {
    pub no_po: String,
    pub perihal_project: Option<String>,
    pub nama_vendor: Option<String>,
    pub nominal: BigDecimal,
}

/// 仪表盘统计
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_po: i64,
    pub total_value: BigDecimal,
    pub paid_invoices: i64,
    pub pending_invoices: i64,
    pub recent_pos: Vec<RecentPo>,
}
