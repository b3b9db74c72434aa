pub mod extract;
pub mod handlers;
pub mod invoice;
pub mod master;
pub mod procurement;
pub mod upload;
pub mod vendor;

use crate::config::AppConfig;
use crate::service::{
    AttachmentService, DashboardService, ExportService, InvoiceService, ProcurementService,
    RequiredDocumentSet, VendorService,
};
use crate::storage::UploadStore;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub vendors: Arc<VendorService>,
    pub procurement: Arc<ProcurementService>,
    pub invoices: Arc<InvoiceService>,
    pub attachments: Arc<AttachmentService>,
    pub dashboard: Arc<DashboardService>,
    pub exports: Arc<ExportService>,
    pub max_files: usize,
}

impl AppState {
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        let uploads = UploadStore::new(&config.uploads.dir);
        let required = RequiredDocumentSet::new(&config.verification.required_documents);

        Self {
            vendors: Arc::new(VendorService::new(pool.clone(), uploads.clone(), required.clone())),
            procurement: Arc::new(ProcurementService::new(pool.clone(), uploads.clone())),
            invoices: Arc::new(InvoiceService::new(pool.clone())),
            attachments: Arc::new(AttachmentService::new(pool.clone(), uploads, required)),
            dashboard: Arc::new(DashboardService::new(pool.clone())),
            exports: Arc::new(ExportService::new(pool.clone())),
            max_files: config.uploads.max_files,
            pool,
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    match config.cors.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => base.allow_origin(origin),
        Err(_) => {
            tracing::warn!(
                "Invalid CORS origin {:?}, cross-origin requests disabled",
                config.cors.allowed_origin
            );
            base
        }
    }
}

/// 构建全部路由
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let master_routes = Router::new()
        .route("/api/kategori", get(master::list_kategori).post(master::create_kategori))
        .route("/api/kategori/:id", get(master::get_kategori).put(master::update_kategori))
        .route("/api/client", get(master::list_clients).post(master::create_client))
        .route("/api/client/:id", get(master::get_client).put(master::update_client));

    let vendor_routes = Router::new()
        .route("/api/vendor", get(vendor::list_vendors).post(vendor::create_vendor))
        .route("/api/vendor/:id", get(vendor::get_vendor).put(vendor::update_vendor))
        .route("/api/vendor/:id/verification", get(vendor::vendor_verification))
        .route("/api/attachments/:id", delete(handlers::delete_attachment));

    let procurement_routes = Router::new()
        .route(
            "/api/po",
            get(procurement::list_purchase_orders).post(procurement::create_purchase_order),
        )
        .route(
            "/api/po/:id",
            get(procurement::get_purchase_order).put(procurement::update_purchase_order),
        )
        .route("/api/memo", get(procurement::list_memos).post(procurement::create_memo))
        .route(
            "/api/memo/:id",
            get(procurement::get_memo).put(procurement::update_memo),
        );

    let invoice_routes = Router::new()
        .route("/api/invoice", get(invoice::list_invoices).post(invoice::create_invoice))
        .route("/api/invoice/:id", get(invoice::get_invoice).put(invoice::update_invoice));

    let report_routes = Router::new()
        .route("/api/dashboard/stats", get(handlers::dashboard_stats))
        .route("/api/export/invoice", get(handlers::export_invoices))
        .route("/api/export/po", get(handlers::export_purchase_orders))
        .route("/api/export/vendor", get(handlers::export_vendors));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .merge(master_routes)
        .merge(vendor_routes)
        .merge(procurement_routes)
        .merge(invoice_routes)
        .merge(report_routes)
        .nest_service("/uploads", ServeDir::new(&config.uploads.dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config))
                .layer(DefaultBodyLimit::max(config.uploads.max_body_bytes)),
        )
}
