use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// 服务错误
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Upload error: {0}")]
    Upload(String),

    /// 请求解析失败 (路径参数, JSON, multipart), 保留原始状态码
    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    fn bad_request(status: StatusCode, message: String) -> Self {
        Self::BadRequest { status, message }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { status, .. } => *status,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Upload(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Storage(_) | Self::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        Self::Export(e.to_string())
    }
}

/// 超出 DefaultBodyLimit 时为 413, 其余为 400
impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        Self::bad_request(e.status(), e.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        Self::bad_request(e.status(), e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        Self::bad_request(e.status(), e.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        Self::bad_request(e.status(), e.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_client_error() {
            tracing::warn!("{} {}", status, self);
        } else {
            tracing::error!("{} {}", status, self);
        }

        // 与旧版前端约定的错误格式
        let body = match &self {
            Self::NotFound(msg) => json!({ "message": msg }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
