use crate::api::extract::{AppJson, AppPath};
use crate::api::AppState;
use crate::db::queries;
use crate::error::{AppError, AppResult};
use crate::models::{Client, ClientInput, Kategori, KategoriInput};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};

fn require_name(value: &str, key: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} wajib diisi", key)));
    }
    Ok(())
}

pub async fn list_kategori(State(state): State<AppState>) -> AppResult<Json<Vec<Kategori>>> {
    Ok(Json(queries::list_kategori(&state.pool).await?))
}

pub async fn get_kategori(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Kategori>> {
    queries::get_kategori(&state.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Kategori tidak ditemukan"))
}

pub async fn create_kategori(
    State(state): State<AppState>,
    AppJson(input): AppJson<KategoriInput>,
) -> AppResult<(StatusCode, Json<Kategori>)> {
    require_name(&input.nama_kategori, "nama_kategori")?;
    let created = queries::insert_kategori(&state.pool, &input).await?;
    tracing::info!("Kategori {} created", created.id_kategori);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_kategori(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<KategoriInput>,
) -> AppResult<Json<Kategori>> {
    require_name(&input.nama_kategori, "nama_kategori")?;
    queries::update_kategori(&state.pool, id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Kategori tidak ditemukan"))
}

pub async fn list_clients(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    Ok(Json(queries::list_clients(&state.pool).await?))
}

pub async fn get_client(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Client>> {
    queries::get_client(&state.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Client tidak ditemukan"))
}

pub async fn create_client(
    State(state): State<AppState>,
    AppJson(input): AppJson<ClientInput>,
) -> AppResult<(StatusCode, Json<Client>)> {
    require_name(&input.nama_brand, "nama_brand")?;
    let created = queries::insert_client(&state.pool, &input).await?;
    tracing::info!("Client {} created", created.id_client);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_client(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<ClientInput>,
) -> AppResult<Json<Client>> {
    require_name(&input.nama_brand, "nama_brand")?;
    queries::update_client(&state.pool, id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Client tidak ditemukan"))
}
