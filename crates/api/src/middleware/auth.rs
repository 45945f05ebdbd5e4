//! # 访问门禁中间件
//!
//! 基于会话 Cookie 的身份验证，未通过门禁的请求一律跳转登录页。

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use gratiam_core::auth::entity::SessionContext;

use crate::error::ApiError;
use crate::server::AppState;
use crate::session::session_id;

/// # Summary
/// 校验会话 Cookie，并将会话上下文注入 request extensions。
///
/// # Logic
/// 1. 从 Cookie 中取出会话 ID，查询会话表。
/// 2. 会话不存在或未认证时返回 `Unauthenticated` (跳转 `/login`)。
/// 3. 通过后下游 Handler 可用 `CurrentSession` 提取。
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = session_id(req.headers()).and_then(|id| state.sessions.get(&id));

    match session {
        Some(session) if session.authenticated => {
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        _ => {
            tracing::debug!("Unauthenticated request to {}", req.uri().path());
            Err(ApiError::Unauthenticated)
        }
    }
}

// 在提取器中获取当前会话的快捷方式
pub struct CurrentSession(pub SessionContext);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)?;
        Ok(CurrentSession(session))
    }
}
