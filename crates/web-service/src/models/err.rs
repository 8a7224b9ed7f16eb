use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use color_eyre::eyre::Error;
use database::DatabaseError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 仓库层数据库错误
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),

    /// 未提供或提供了无效的调用者身份
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 调用者没有权限访问该资源
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 其他类型错误
    #[error(transparent)]
    InternalError(#[from] Error),
}

/// 应用层结果类型
pub type AppResult<T> = Result<T, AppError>;

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ValidationFailed(err) => (StatusCode::BAD_REQUEST, format!("Validate failed: {err}")).into_response(),
            AppError::RepositoryError(err) => match err {
                DatabaseError::SqlxError(sqlx::Error::RowNotFound) => {
                    (StatusCode::NOT_FOUND, format!("Record not found: {err}")).into_response()
                }
                DatabaseError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("Resource not found: {msg}")).into_response(),
                _ => {
                    error!("❌ 数据库错误: {err}");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Repository error").into_response()
                }
            },
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, format!("Unauthorized: {msg}")).into_response(),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, format!("Forbidden: {msg}")).into_response(),
            AppError::InternalError(err) => {
                error!("❌ 内部错误: {err:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
            }
        }
    }
}
