use procurement_admin::{create_pool, router, AppConfig, AppState, UploadStore};
use tracing::info;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式, RUST_LOG 可覆盖级别
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database).await?;
    info!("Database pool created");

    UploadStore::new(&config.uploads.dir).ensure_dir().await?;
    info!("Upload directory ready: {}", config.uploads.dir);

    let state = AppState::new(pool, &config);
    let app = router(state, &config);

    // 启动服务器
    let addr = config.bind_addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET/POST     /api/kategori, /api/client");
    info!("  GET/POST/PUT /api/vendor (multipart), /api/vendor/:id/verification");
    info!("  GET/POST/PUT /api/po, /api/memo (multipart)");
    info!("  GET/POST/PUT /api/invoice");
    info!("  DELETE       /api/attachments/:id");
    info!("  GET          /api/dashboard/stats, /api/export/{{invoice,po,vendor}}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
