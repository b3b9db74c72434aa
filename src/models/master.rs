use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 分类表 (kategori)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Kategori {
    pub id_kategori: i32,
    pub nama_kategori: String,
}

/// 新建/修改分类的请求体
#[derive(Debug, Clone, Deserialize)]
pub struct KategoriInput {
    pub nama_kategori: String,
}

/// 客户表 (client)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Client {
    pub id_client: i32,
    pub nama_brand: String,
    pub nama_pt: Option<String>,
    pub alamat: Option<String>,
}

/// 新建/修改客户的请求体
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInput {
    pub nama_brand: String,
    pub nama_pt: Option<String>,
    pub alamat: Option<String>,
}
