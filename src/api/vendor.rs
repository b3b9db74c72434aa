use crate::api::extract::{AppMultipart, AppPath};
use crate::api::upload::UploadForm;
use crate::api::AppState;
use crate::error::AppResult;
use crate::models::{VendorDetail, VendorFields, VendorListRow, VendorVerificationReport};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use serde::Serialize;

/// 新建/修改供应商的响应体
#[derive(Debug, Serialize)]
pub struct VendorSavedResponse {
    pub id_vendor: i32,
    pub status_verifikasi: String,
    pub message: String,
}

fn vendor_fields(form: &UploadForm) -> AppResult<VendorFields> {
    Ok(VendorFields {
        nama_pt_cv: form.text("nama_pt_cv"),
        nama_vendor: form.text("nama_vendor"),
        id_kategori: form.int("id_kategori")?,
        alamat: form.text("alamat"),
        no_pic: form.text("no_pic"),
        nama_pic: form.text("nama_pic"),
    })
}

pub async fn list_vendors(State(state): State<AppState>) -> AppResult<Json<Vec<VendorListRow>>> {
    Ok(Json(state.vendors.list().await?))
}

pub async fn get_vendor(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<VendorDetail>> {
    Ok(Json(state.vendors.detail(id).await?))
}

/// 新建供应商; 验证状态由附件推导, 忽略表单中的 status_verifikasi
pub async fn create_vendor(
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<VendorSavedResponse>)> {
    let form = UploadForm::from_multipart(multipart, state.max_files).await?;
    form.require_text("nama_pt_cv")?;
    let fields = vendor_fields(&form)?;

    let (id_vendor, status) = state.vendors.create(&fields, form.files()).await?;
    Ok((
        StatusCode::CREATED,
        Json(VendorSavedResponse {
            id_vendor,
            status_verifikasi: status.to_string(),
            message: "Vendor berhasil dibuat".to_string(),
        }),
    ))
}

/// 部分更新: 空字段沿用旧值
pub async fn update_vendor(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<Json<VendorSavedResponse>> {
    let form = UploadForm::from_multipart(multipart, state.max_files).await?;
    let fields = vendor_fields(&form)?;

    let status = state.vendors.update(id, &fields, form.files()).await?;
    Ok(Json(VendorSavedResponse {
        id_vendor: id,
        status_verifikasi: status.to_string(),
        message: "Vendor berhasil diperbarui".to_string(),
    }))
}

pub async fn vendor_verification(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<VendorVerificationReport>> {
    Ok(Json(state.vendors.verification_report(id).await?))
}
