use crate::api::extract::{AppMultipart, AppPath};
use crate::api::handlers::MessageResponse;
use crate::api::upload::UploadForm;
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{
    MemoDetail, MemoFields, MemoListRow, PurchaseOrderDetail, PurchaseOrderFields,
    PurchaseOrderListRow,
};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PoCreatedResponse {
    pub no_po: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MemoCreatedResponse {
    pub no_memo: String,
    pub message: String,
}

fn po_fields(form: &UploadForm) -> AppResult<PurchaseOrderFields> {
    Ok(PurchaseOrderFields {
        id_vendor: form.int("id_vendor")?,
        id_client: form.int("id_client")?,
        no_memo: form.text("no_memo"),
        nominal: form.amount("nominal")?,
        perihal_project: form.text("perihal_project"),
        tanggal_po: form.date("tanggal_po")?,
        status_po: form.text("status_po"),
    })
}

fn memo_fields(form: &UploadForm) -> AppResult<MemoFields> {
    Ok(MemoFields {
        id_client: form.int("id_client")?,
        perihal: form.text("perihal"),
    })
}

pub async fn list_purchase_orders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PurchaseOrderListRow>>> {
    Ok(Json(state.procurement.list_purchase_orders().await?))
}

/// no_po 可能含 `/`, 由前端编码后传入, 路由已解码
pub async fn get_purchase_order(
    State(state): State<AppState>,
    AppPath(no_po): AppPath<String>,
) -> AppResult<Json<PurchaseOrderDetail>> {
    Ok(Json(state.procurement.purchase_order_detail(&no_po).await?))
}

pub async fn create_purchase_order(
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<PoCreatedResponse>)> {
    let form = UploadForm::from_multipart(multipart, state.max_files).await?;
    let no_po = form.require_text("no_po")?;
    let fields = po_fields(&form)?;
    let nominal = fields
        .nominal
        .clone()
        .ok_or_else(|| AppError::validation("nominal wajib diisi"))?;

    let created = state
        .procurement
        .create_purchase_order(&no_po, &nominal, &fields, form.files())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PoCreatedResponse {
            no_po: created,
            message: "PO berhasil dibuat".to_string(),
        }),
    ))
}

pub async fn update_purchase_order(
    State(state): State<AppState>,
    AppPath(no_po): AppPath<String>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<Json<MessageResponse>> {
    let form = UploadForm::from_multipart(multipart, state.max_files).await?;
    let fields = po_fields(&form)?;

    state
        .procurement
        .update_purchase_order(&no_po, &fields, form.files())
        .await?;
    Ok(MessageResponse::new("PO berhasil diperbarui"))
}

pub async fn list_memos(State(state): State<AppState>) -> AppResult<Json<Vec<MemoListRow>>> {
    Ok(Json(state.procurement.list_memos().await?))
}

pub async fn get_memo(
    State(state): State<AppState>,
    AppPath(no_memo): AppPath<String>,
) -> AppResult<Json<MemoDetail>> {
    Ok(Json(state.procurement.memo_detail(&no_memo).await?))
}

pub async fn create_memo(
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<MemoCreatedResponse>)> {
    let form = UploadForm::from_multipart(multipart, state.max_files).await?;
    let no_memo = form.require_text("no_memo")?;
    let fields = memo_fields(&form)?;

    let created = state
        .procurement
        .create_memo(&no_memo, &fields, form.files())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MemoCreatedResponse {
            no_memo: created,
            message: "Memo berhasil dibuat".to_string(),
        }),
    ))
}

pub async fn update_memo(
    State(state): State<AppState>,
    AppPath(no_memo): AppPath<String>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<Json<MessageResponse>> {
    let form = UploadForm::from_multipart(multipart, state.max_files).await?;
    let fields = memo_fields(&form)?;

    state
        .procurement
        .update_memo(&no_memo, &fields, form.files())
        .await?;
    Ok(MessageResponse::new("Memo berhasil diperbarui"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn form(pairs: &[(&str, &str)]) -> UploadForm {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        UploadForm::new(fields, Vec::new())
    }

    #[test]
    fn po_fields_parse_typed_values() {
        let parsed = po_fields(&form(&[
            ("id_vendor", "2"),
            ("nominal", "2500000"),
            ("tanggal_po", "2024-07-01"),
            ("status_po", "Open"),
            ("no_memo", ""),
        ]))
        .unwrap();

        assert_eq!(parsed.id_vendor, Some(2));
        assert_eq!(parsed.id_client, None);
        assert_eq!(parsed.nominal, Some(BigDecimal::from(2500000)));
        assert_eq!(parsed.tanggal_po, NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(parsed.no_memo, None);
    }

    #[test]
    fn po_fields_reject_bad_nominal() {
        assert!(po_fields(&form(&[("nominal", "satu juta")])).is_err());
        assert!(po_fields(&form(&[("nominal", "-100")])).is_err());
    }

    #[test]
    fn memo_fields_keep_absent_values() {
        let parsed = memo_fields(&form(&[("perihal", "Pengadaan laptop")])).unwrap();
        assert_eq!(
            parsed,
            MemoFields {
                id_client: None,
                perihal: Some("Pengadaan laptop".to_string()),
            }
        );
    }
}
