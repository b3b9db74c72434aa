use crate::db::queries;
use crate::error::AppResult;
use crate::models::DashboardStats;
use bigdecimal::{BigDecimal, Zero};
use sqlx::PgPool;

const RECENT_PO_LIMIT: i64 = 5;

/// 仪表盘统计服务
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 并发执行四个统计查询
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let (totals, paid_invoices, pending_invoices, recent_pos) = futures::try_join!(
            queries::po_totals(&self.pool),
            queries::count_invoices_by_status(&self.pool, &["Paid"]),
            queries::count_invoices_by_status(&self.pool, &["Bill", "Unbill"]),
            queries::recent_purchase_orders(&self.pool, RECENT_PO_LIMIT),
        )?;

        Ok(DashboardStats {
            total_po: totals.total_po,
            total_value: totals.total_value.unwrap_or_else(BigDecimal::zero),
            paid_invoices,
            pending_invoices,
            recent_pos,
        })
    }
}
