//! End-to-end workflows against a real Postgres.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`. The schema in
//! `sql/schema.sql` is applied on first use; every test works on rows it creates
//! itself, keyed by a fresh suffix, so the suites can share one database.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use common::{body_text, json_request, multipart_request, test_config, Part};
use procurement_admin::{router, AppState};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use tempfile::TempDir;
use tower::ServiceExt;

const SCHEMA: &str = include_str!("../sql/schema.sql");
const REQUIRED_FIELDS: [&str; 5] = [
    "npwp_file",
    "ktp_direktur_file",
    "surat_pernyataan_file",
    "akta_pendirian_file",
    "nib_file",
];

struct TestApp {
    router: Router,
    uploads: TempDir,
}

impl TestApp {
    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let text = body_text(response).await;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Request::get(uri).body(Body::empty()).expect("request"))
            .await
    }

    fn stored_files(&self) -> usize {
        std::fs::read_dir(self.uploads.path())
            .expect("read uploads")
            .count()
    }
}

/// 未设置 DATABASE_URL 时返回 None, 测试直接跳过
async fn test_app() -> Option<TestApp> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect");
    apply_schema(&pool).await;

    let uploads = TempDir::new().expect("tempdir");
    let mut config = test_config(&uploads);
    config.database.url = url;
    let router = router(AppState::new(pool, &config), &config);
    Some(TestApp { router, uploads })
}

/// 建表语句在咨询锁内执行, 并行测试不会同时建表
async fn apply_schema(pool: &PgPool) {
    let mut tx = pool.begin().await.expect("begin");
    sqlx::query("SELECT pg_advisory_xact_lock(20240501)")
        .execute(&mut *tx)
        .await
        .expect("schema lock");
    (&mut *tx).execute(SCHEMA).await.expect("apply schema");
    tx.commit().await.expect("commit schema");
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_micros())
}

fn attachment_id(vendor: &Value, document_type: &str) -> i64 {
    vendor["attachments"]
        .as_array()
        .expect("attachments")
        .iter()
        .find(|a| a["document_type"] == document_type)
        .and_then(|a| a["id_attachment"].as_i64())
        .expect("attachment of type")
}

fn attachment_ids(vendor: &Value, document_type: &str) -> Vec<i64> {
    vendor["attachments"]
        .as_array()
        .expect("attachments")
        .iter()
        .filter(|a| a["document_type"] == document_type)
        .filter_map(|a| a["id_attachment"].as_i64())
        .collect()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn vendor_status_follows_attachments() {
    let Some(app) = test_app().await else {
        return;
    };

    // 五份必备文件齐全
    let name = unique("PT Lengkap");
    let mut parts = vec![Part::Text("nama_pt_cv", &name)];
    for field in REQUIRED_FIELDS {
        parts.push(Part::File(field, "dokumen.pdf", b"%PDF-1.4"));
    }
    let (status, created) = app
        .call(multipart_request(Method::POST, "/api/vendor", &parts))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status_verifikasi"], "Terverifikasi");
    let id = created["id_vendor"].as_i64().expect("id_vendor");
    let uri = format!("/api/vendor/{}", id);
    assert_eq!(app.stored_files(), 5);

    // 重复上传同类文件, 状态不变
    let duplicate = [Part::File("NPWP_FILE", "npwp-baru.pdf", b"%PDF-1.7")];
    let (status, updated) = app
        .call(multipart_request(Method::PUT, &uri, &duplicate))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status_verifikasi"], "Terverifikasi");

    let (_, vendor) = app.get(&uri).await;
    let npwp = attachment_ids(&vendor, "NPWP_FILE");
    assert_eq!(npwp.len(), 2);

    // 删除一份重复的 NPWP, 另一份仍在
    let (status, _) = app
        .call(
            Request::delete(format!("/api/attachments/{}", npwp[0]))
                .body(Body::empty())
                .expect("request"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, vendor) = app.get(&uri).await;
    assert_eq!(vendor["status_verifikasi"], "Terverifikasi");

    // 删除唯一的 NIB, 回到未验证
    let nib = attachment_id(&vendor, "NIB_FILE");
    let (status, _) = app
        .call(
            Request::delete(format!("/api/attachments/{}", nib))
                .body(Body::empty())
                .expect("request"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, vendor) = app.get(&uri).await;
    assert_eq!(vendor["status_verifikasi"], "Belum terverifikasi");
    assert_eq!(app.stored_files(), 4);

    let (_, report) = app.get(&format!("{}/verification", uri)).await;
    assert_eq!(report["missing_documents"], serde_json::json!(["NIB_FILE"]));

    // 已删除的附件再删为 404
    let (status, body) = app
        .call(
            Request::delete(format!("/api/attachments/{}", nib))
                .body(Body::empty())
                .expect("request"),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn vendor_client_status_is_ignored() {
    let Some(app) = test_app().await else {
        return;
    };

    let name = unique("PT Sebagian");
    let parts = [
        Part::Text("nama_pt_cv", &name),
        Part::Text("status_verifikasi", "Terverifikasi"),
        Part::File("npwp_file", "npwp.pdf", b"%PDF-1.4"),
    ];
    let (status, created) = app
        .call(multipart_request(Method::POST, "/api/vendor", &parts))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status_verifikasi"], "Belum terverifikasi");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn invoice_figures_follow_current_po_nominal() {
    let Some(app) = test_app().await else {
        return;
    };

    let no_po = unique("PO-IT");
    let parts = [
        Part::Text("no_po", &no_po),
        Part::Text("nominal", "1000000"),
        Part::Text("tanggal_po", "2024-06-01"),
    ];
    let (status, _) = app
        .call(multipart_request(Method::POST, "/api/po", &parts))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, invoice) = app
        .call(json_request(
            Method::POST,
            "/api/invoice",
            serde_json::json!({
                "no_po": no_po,
                "no_invoice": unique("INV"),
                "status_invoice": "Bill",
                "termin": 1,
                "invoice_portion_percent": 50,
                "ppn_status": "PKP"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invoice["dpp"].as_f64(), Some(500000.0));
    assert_eq!(invoice["grand_total"].as_f64(), Some(545000.0));
    let id = invoice["id_invoice"].as_i64().expect("id_invoice");

    // 修改 PO 金额后, 发票读取时按新金额重新计算
    let change = [Part::Text("nominal", "2000000")];
    let (status, _) = app
        .call(multipart_request(
            Method::PUT,
            &format!("/api/po/{}", no_po),
            &change,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, invoice) = app.get(&format!("/api/invoice/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(invoice["dpp"].as_f64(), Some(1000000.0));
    assert_eq!(invoice["ppn"].as_f64(), Some(110000.0));
    assert_eq!(invoice["pph"].as_f64(), Some(20000.0));
    assert_eq!(invoice["grand_total"].as_f64(), Some(1090000.0));

    let (_, list) = app.get("/api/invoice").await;
    let listed = list
        .as_array()
        .expect("invoice list")
        .iter()
        .find(|row| row["id_invoice"].as_i64() == Some(id))
        .expect("invoice listed")
        .clone();
    assert_eq!(listed["grand_total"].as_f64(), Some(1090000.0));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn invoice_for_unknown_po_is_rejected() {
    let Some(app) = test_app().await else {
        return;
    };

    let (status, body) = app
        .call(json_request(
            Method::POST,
            "/api/invoice",
            serde_json::json!({
                "no_po": unique("PO-MISSING"),
                "invoice_portion_percent": 10
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").contains("tidak ditemukan"));
}
