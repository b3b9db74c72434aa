use crate::models::{
    InvoiceInput, InvoiceRow, Memo, MemoFields, MemoListRow, PurchaseOrder, PurchaseOrderFields,
    PurchaseOrderListRow,
};
use bigdecimal::BigDecimal;
use sqlx::{Executor, PgPool, Postgres};

/// 查询全部 PO (带供应商/客户名称, 按日期降序)
pub async fn list_purchase_orders(pool: &PgPool) -> Result<Vec<PurchaseOrderListRow>, sqlx::Error> {
    sqlx::query_as::<_, PurchaseOrderListRow>(
        r#"
        SELECT po.no_po, po.id_vendor, po.id_client, po.no_memo, po.nominal,
               po.perihal_project, po.tanggal_po, po.status_po,
               v.nama_pt_cv AS nama_vendor,
               c.nama_brand AS nama_client
        FROM purchase_order po
        LEFT JOIN vendor v ON po.id_vendor = v.id_vendor
        LEFT JOIN client c ON po.id_client = c.id_client
        ORDER BY po.tanggal_po DESC
        "#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_purchase_order<'e, E>(executor: E, no_po: &str) -> Result<Option<PurchaseOrder>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, PurchaseOrder>(
        r#"
        SELECT no_po, id_vendor, id_client, no_memo, nominal,
               perihal_project, tanggal_po, status_po
        FROM purchase_order
        WHERE no_po = $1
        "#
    )
    .bind(no_po)
    .fetch_optional(executor)
    .await
}

/// 查询 PO 当前金额 (发票计算的输入)
pub async fn purchase_order_nominal(pool: &PgPool, no_po: &str) -> Result<Option<BigDecimal>, sqlx::Error> {
    sqlx::query_scalar::<_, BigDecimal>("SELECT nominal FROM purchase_order WHERE no_po = $1")
        .bind(no_po)
        .fetch_optional(pool)
        .await
}

/// 新建 PO, nominal 必填
pub async fn insert_purchase_order<'e, E>(
    executor: E,
    no_po: &str,
    nominal: &BigDecimal,
    fields: &PurchaseOrderFields,
) -> Result<String, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, String>(
        r#"
        INSERT INTO purchase_order (no_po, id_vendor, id_client, no_memo, nominal, perihal_project, tanggal_po, status_po)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING no_po
        "#
    )
    .bind(no_po)
    .bind(fields.id_vendor)
    .bind(fields.id_client)
    .bind(&fields.no_memo)
    .bind(nominal)
    .bind(&fields.perihal_project)
    .bind(fields.tanggal_po)
    .bind(&fields.status_po)
    .fetch_one(executor)
    .await
}

/// 部分更新: NULL 字段沿用旧值
pub async fn update_purchase_order<'e, E>(
    executor: E,
    no_po: &str,
    fields: &PurchaseOrderFields,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        r#"
        UPDATE purchase_order SET
            perihal_project = COALESCE($1, perihal_project),
            nominal         = COALESCE($2, nominal),
            status_po       = COALESCE($3, status_po),
            id_vendor       = COALESCE($4, id_vendor),
            id_client       = COALESCE($5, id_client),
            no_memo         = COALESCE($6, no_memo),
            tanggal_po      = COALESCE($7, tanggal_po)
        WHERE no_po = $8
        "#
    )
    .bind(&fields.perihal_project)
    .bind(&fields.nominal)
    .bind(&fields.status_po)
    .bind(fields.id_vendor)
    .bind(fields.id_client)
    .bind(&fields.no_memo)
    .bind(fields.tanggal_po)
    .bind(no_po)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// 查询全部备忘录 (带客户信息)
pub async fn list_memos(pool: &PgPool) -> Result<Vec<MemoListRow>, sqlx::Error> {
    sqlx::query_as::<_, MemoListRow>(
        r#"
        SELECT m.no_memo, m.id_client, m.perihal, c.nama_brand, c.nama_pt
        FROM memo_procurement m
        LEFT JOIN client c ON m.id_client = c.id_client
        ORDER BY m.no_memo ASC
        "#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_memo<'e, E>(executor: E, no_memo: &str) -> Result<Option<Memo>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, Memo>(
        r#"
        SELECT no_memo, id_client, perihal
        FROM memo_procurement
        WHERE no_memo = $1
        "#
    )
    .bind(no_memo)
    .fetch_optional(executor)
    .await
}

pub async fn insert_memo<'e, E>(executor: E, no_memo: &str, fields: &MemoFields) -> Result<String, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, String>(
        r#"
        INSERT INTO memo_procurement (no_memo, id_client, perihal)
        VALUES ($1, $2, $3)
        RETURNING no_memo
        "#
    )
    .bind(no_memo)
    .bind(fields.id_client)
    .bind(&fields.perihal)
    .fetch_one(executor)
    .await
}

pub async fn update_memo<'e, E>(executor: E, no_memo: &str, fields: &MemoFields) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        r#"
        UPDATE memo_procurement SET
            perihal   = COALESCE($1, perihal),
            id_client = COALESCE($2, id_client)
        WHERE no_memo = $3
        "#
    )
    .bind(&fields.perihal)
    .bind(fields.id_client)
    .bind(no_memo)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// 查询全部发票, nominal_po 取关联 PO 的当前金额
pub async fn list_invoices(pool: &PgPool) -> Result<Vec<InvoiceRow>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceRow>(
        r#"
        SELECT i.id_invoice, i.no_po, i.no_invoice, i.status_invoice, i.termin,
               i.invoice_portion_percent, i.ppn_status,
               po.nominal AS nominal_po
        FROM invoice i
        JOIN purchase_order po ON i.no_po = po.no_po
        ORDER BY i.id_invoice ASC
        "#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_invoice(pool: &PgPool, id: i32) -> Result<Option<InvoiceRow>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceRow>(
        r#"
        SELECT i.id_invoice, i.no_po, i.no_invoice, i.status_invoice, i.termin,
               i.invoice_portion_percent, i.ppn_status,
               po.nominal AS nominal_po
        FROM invoice i
        JOIN purchase_order po ON i.no_po = po.no_po
        WHERE i.id_invoice = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// 新建发票并连同 PO 金额一起返回
pub async fn insert_invoice(pool: &PgPool, input: &InvoiceInput) -> Result<InvoiceRow, sqlx::Error> {
    sqlx::query_as::<_, InvoiceRow>(
        r#"
        WITH inserted AS (
            INSERT INTO invoice (no_po, no_invoice, status_invoice, termin, invoice_portion_percent, ppn_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        )
        SELECT i.id_invoice, i.no_po, i.no_invoice, i.status_invoice, i.termin,
               i.invoice_portion_percent, i.ppn_status,
               po.nominal AS nominal_po
        FROM inserted i
        JOIN purchase_order po ON i.no_po = po.no_po
        "#
    )
    .bind(&input.no_po)
    .bind(&input.no_invoice)
    .bind(&input.status_invoice)
    .bind(input.termin)
    .bind(&input.invoice_portion_percent)
    .bind(&input.ppn_status)
    .fetch_one(pool)
    .await
}

/// 整体替换发票, 不存在时返回 None
pub async fn update_invoice(
    pool: &PgPool,
    id: i32,
    input: &InvoiceInput,
) -> Result<Option<InvoiceRow>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceRow>(
        r#"
        WITH updated AS (
            UPDATE invoice SET
                no_po = $1, no_invoice = $2, status_invoice = $3, termin = $4,
                invoice_portion_percent = $5, ppn_status = $6
            WHERE id_invoice = $7
            RETURNING *
        )
        SELECT i.id_invoice, i.no_po, i.no_invoice, i.status_invoice, i.termin,
               i.invoice_portion_percent, i.ppn_status,
               po.nominal AS nominal_po
        FROM updated i
        JOIN purchase_order po ON i.no_po = po.no_po
        "#
    )
    .bind(&input.no_po)
    .bind(&input.no_invoice)
    .bind(&input.status_invoice)
    .bind(input.termin)
    .bind(&input.invoice_portion_percent)
    .bind(&input.ppn_status)
    .bind(id)
    .fetch_optional(pool)
    .await
}
