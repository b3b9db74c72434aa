use crate::api::extract::{AppJson, AppPath};
use crate::api::AppState;
use crate::error::AppResult;
use crate::models::{InvoiceDetail, InvoiceInput};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};

/// 发票列表, 派生金额按关联 PO 的当前金额重新计算
pub async fn list_invoices(State(state): State<AppState>) -> AppResult<Json<Vec<InvoiceDetail>>> {
    Ok(Json(state.invoices.list().await?))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<InvoiceDetail>> {
    Ok(Json(state.invoices.get(id).await?))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    AppJson(input): AppJson<InvoiceInput>,
) -> AppResult<(StatusCode, Json<InvoiceDetail>)> {
    let created = state.invoices.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<InvoiceInput>,
) -> AppResult<Json<InvoiceDetail>> {
    Ok(Json(state.invoices.update(id, &input).await?))
}
