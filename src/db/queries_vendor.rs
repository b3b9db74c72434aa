use crate::models::{
    Attachment, AttachmentOwner, AttachmentRecord, StoredFile, Vendor, VendorFields, VendorListRow,
};
use sqlx::{Executor, Postgres};

/// 查询全部供应商 (带分类名称)
pub async fn list_vendors<'e, E>(executor: E) -> Result<Vec<VendorListRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, VendorListRow>(
        r#"
        SELECT v.id_vendor, v.nama_pt_cv, v.nama_vendor, v.id_kategori,
               v.alamat, v.no_pic, v.nama_pic, v.status_verifikasi,
               k.nama_kategori
        FROM vendor v
        LEFT JOIN kategori k ON v.id_kategori = k.id_kategori
        ORDER BY v.id_vendor ASC
        "#
    )
    .fetch_all(executor)
    .await
}

pub async fn get_vendor<'e, E>(executor: E, id: i32) -> Result<Option<Vendor>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, Vendor>(
        r#"
        SELECT id_vendor, nama_pt_cv, nama_vendor, id_kategori,
               alamat, no_pic, nama_pic, status_verifikasi
        FROM vendor
        WHERE id_vendor = $1
        "#
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// 锁定供应商行 (事务内使用, 保证单写者)
pub async fn lock_vendor<'e, E>(executor: E, id: i32) -> Result<Option<i32>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, i32>(
        r#"
        SELECT id_vendor FROM vendor WHERE id_vendor = $1 FOR UPDATE
        "#
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// 新建供应商, 返回 id_vendor
pub async fn insert_vendor<'e, E>(
    executor: E,
    fields: &VendorFields,
    status: &str,
) -> Result<i32, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO vendor (nama_pt_cv, nama_vendor, id_kategori, alamat, no_pic, nama_pic, status_verifikasi)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id_vendor
        "#
    )
    .bind(&fields.nama_pt_cv)
    .bind(&fields.nama_vendor)
    .bind(fields.id_kategori)
    .bind(&fields.alamat)
    .bind(&fields.no_pic)
    .bind(&fields.nama_pic)
    .bind(status)
    .fetch_one(executor)
    .await
}

/// 部分更新: NULL 字段沿用旧值
pub async fn update_vendor<'e, E>(
    executor: E,
    id: i32,
    fields: &VendorFields,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        r#"
        UPDATE vendor SET
            nama_pt_cv  = COALESCE($1, nama_pt_cv),
            nama_vendor = COALESCE($2, nama_vendor),
            id_kategori = COALESCE($3, id_kategori),
            alamat      = COALESCE($4, alamat),
            no_pic      = COALESCE($5, no_pic),
            nama_pic    = COALESCE($6, nama_pic)
        WHERE id_vendor = $7
        "#
    )
    .bind(&fields.nama_pt_cv)
    .bind(&fields.nama_vendor)
    .bind(fields.id_kategori)
    .bind(&fields.alamat)
    .bind(&fields.no_pic)
    .bind(&fields.nama_pic)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn set_vendor_status<'e, E>(executor: E, id: i32, status: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query("UPDATE vendor SET status_verifikasi = $1 WHERE id_vendor = $2")
        .bind(status)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// 供应商当前已上传的文档类型 (去重)
pub async fn vendor_document_types<'e, E>(executor: E, id: i32) -> Result<Vec<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT document_type
        FROM attachments
        WHERE related_table = 'vendor'
          AND related_id_int = $1
          AND document_type IS NOT NULL
        "#
    )
    .bind(id)
    .fetch_all(executor)
    .await
}

/// 写入一条附件记录
pub async fn insert_attachment<'e, E>(
    executor: E,
    owner: &AttachmentOwner,
    file: &StoredFile,
) -> Result<i32, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO attachments (file_path, document_type, related_table, related_id_text, related_id_int)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id_attachment
        "#
    )
    .bind(&file.file_path)
    .bind(&file.document_type)
    .bind(owner.related_table())
    .bind(owner.id_text())
    .bind(owner.id_int())
    .fetch_one(executor)
    .await
}

/// 查询某条记录的附件 (新上传的在前)
pub async fn list_attachments<'e, E>(
    executor: E,
    owner: &AttachmentOwner,
) -> Result<Vec<Attachment>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, Attachment>(
        r#"
        SELECT id_attachment, file_path, document_type, uploaded_at
        FROM attachments
        WHERE related_table = $1
          AND related_id_text IS NOT DISTINCT FROM $2
          AND related_id_int IS NOT DISTINCT FROM $3
        ORDER BY uploaded_at DESC, id_attachment DESC
        "#
    )
    .bind(owner.related_table())
    .bind(owner.id_text())
    .bind(owner.id_int())
    .fetch_all(executor)
    .await
}

/// 查询并锁定附件行
pub async fn lock_attachment<'e, E>(executor: E, id: i32) -> Result<Option<AttachmentRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, AttachmentRecord>(
        r#"
        SELECT id_attachment, file_path, related_table, related_id_text, related_id_int
        FROM attachments
        WHERE id_attachment = $1
        FOR UPDATE
        "#
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete_attachment<'e, E>(executor: E, id: i32) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query("DELETE FROM attachments WHERE id_attachment = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
