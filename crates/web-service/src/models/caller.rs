//! 调用者身份
//!
//! 调用者通过 `x-user-id` 请求头声明自己的用户ID，
//! 不带该请求头的请求视为匿名访问。

use crate::models::err::AppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// 标识调用者的请求头
pub const CALLER_HEADER: &str = "x-user-id";

/// 当前请求的调用者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caller {
    /// 匿名访问时为空
    pub user_id: Option<i64>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user(user_id: i64) -> Self {
        Self { user_id: Some(user_id) }
    }

    /// 要求调用者已登录
    pub fn require_user(&self) -> Result<i64, AppError> {
        self.user_id
            .ok_or_else(|| AppError::Unauthorized(format!("missing {CALLER_HEADER} header")))
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(CALLER_HEADER) else {
            return Ok(Caller::anonymous());
        };

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(Caller::user)
            .ok_or_else(|| AppError::Unauthorized(format!("invalid {CALLER_HEADER} header")))
    }
}
