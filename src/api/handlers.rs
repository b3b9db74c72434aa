use crate::api::extract::AppPath;
use crate::api::AppState;
use crate::error::AppResult;
use crate::models::DashboardStats;
use axum::{
    extract::{Json, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 通用响应体
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

pub async fn index() -> &'static str {
    "API Pendataan Berjalan!"
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 仪表盘统计
pub async fn dashboard_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.dashboard.stats().await?))
}

/// 删除附件 (同时删除文件, 供应商附件会触发重新验证)
pub async fn delete_attachment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.attachments.delete(id).await?;
    Ok(MessageResponse::new("Attachment berhasil dihapus"))
}

fn csv_response(prefix: &str, body: Vec<u8>) -> Response {
    let file_name = format!("{}-{}.csv", prefix, chrono::Local::now().format("%Y%m%d"));
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}

/// 导出发票 (含 DPP/PPN/PPh/合计)
pub async fn export_invoices(State(state): State<AppState>) -> AppResult<Response> {
    Ok(csv_response("invoice", state.exports.invoices().await?))
}

pub async fn export_purchase_orders(State(state): State<AppState>) -> AppResult<Response> {
    Ok(csv_response("purchase-order", state.exports.purchase_orders().await?))
}

pub async fn export_vendors(State(state): State<AppState>) -> AppResult<Response> {
    Ok(csv_response("vendor", state.exports.vendors().await?))
}
