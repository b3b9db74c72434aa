use crate::models::{Client, ClientInput, Kategori, KategoriInput, PoTotals, RecentPo};
use sqlx::PgPool;

/// 查询全部分类
pub async fn list_kategori(pool: &PgPool) -> Result<Vec<Kategori>, sqlx::Error> {
    sqlx::query_as::<_, Kategori>(
        r#"
        SELECT id_kategori, nama_kategori
        FROM kategori
        ORDER BY id_kategori ASC
        "#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_kategori(pool: &PgPool, id: i32) -> Result<Option<Kategori>, sqlx::Error> {
    sqlx::query_as::<_, Kategori>(
        r#"
        SELECT id_kategori, nama_kategori
        FROM kategori
        WHERE id_kategori = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_kategori(pool: &PgPool, input: &KategoriInput) -> Result<Kategori, sqlx::Error> {
    sqlx::query_as::<_, Kategori>(
        r#"
        INSERT INTO kategori (nama_kategori)
        VALUES ($1)
        RETURNING id_kategori, nama_kategori
        "#
    )
    .bind(&input.nama_kategori)
    .fetch_one(pool)
    .await
}

/// 修改分类, 不存在时返回 None
pub async fn update_kategori(
    pool: &PgPool,
    id: i32,
    input: &KategoriInput,
) -> Result<Option<Kategori>, sqlx::Error> {
    sqlx::query_as::<_, Kategori>(
        r#"
        UPDATE kategori SET nama_kategori = $1
        WHERE id_kategori = $2
        RETURNING id_kategori, nama_kategori
        "#
    )
    .bind(&input.nama_kategori)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// 查询全部客户
pub async fn list_clients(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        r#"
        SELECT id_client, nama_brand, nama_pt, alamat
        FROM client
        ORDER BY id_client ASC
        "#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_client(pool: &PgPool, id: i32) -> Result<Option<Client>, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        r#"
        SELECT id_client, nama_brand, nama_pt, alamat
        FROM client
        WHERE id_client = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_client(pool: &PgPool, input: &ClientInput) -> Result<Client, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        r#"
        INSERT INTO client (nama_brand, nama_pt, alamat)
        VALUES ($1, $2, $3)
        RETURNING id_client, nama_brand, nama_pt, alamat
        "#
    )
    .bind(&input.nama_brand)
    .bind(&input.nama_pt)
    .bind(&input.alamat)
    .fetch_one(pool)
    .await
}

pub async fn update_client(
    pool: &PgPool,
    id: i32,
    input: &ClientInput,
) -> Result<Option<Client>, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        r#"
        UPDATE client SET nama_brand = $1, nama_pt = $2, alamat = $3
        WHERE id_client = $4
        RETURNING id_client, nama_brand, nama_pt, alamat
        "#
    )
    .bind(&input.nama_brand)
    .bind(&input.nama_pt)
    .bind(&input.alamat)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// 统计 PO 数量和总金额
pub async fn po_totals(pool: &PgPool) -> Result<PoTotals, sqlx::Error> {
    sqlx::query_as::<_, PoTotals>(
        r#"
        SELECT COUNT(*) AS total_po, SUM(nominal) AS total_value
        FROM purchase_order
        "#
    )
    .fetch_one(pool)
    .await
}

/// 统计指定状态的发票数量
pub async fn count_invoices_by_status(pool: &PgPool, statuses: &[&str]) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM invoice
        WHERE status_invoice = ANY($1)
        "#
    )
    .bind(statuses)
    .fetch_one(pool)
    .await
}

/// 最近的 PO (按日期降序)
pub async fn recent_purchase_orders(pool: &PgPool, limit: i64) -> Result<Vec<RecentPo>, sqlx::Error> {
    sqlx::query_as::<_, RecentPo>(
        r#"
        SELECT po.no_po, po.perihal_project, v.nama_pt_cv AS nama_vendor, po.nominal
        FROM purchase_order po
        JOIN vendor v ON po.id_vendor = v.id_vendor
        ORDER BY po.tanggal_po DESC
        LIMIT $1
        "#
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
