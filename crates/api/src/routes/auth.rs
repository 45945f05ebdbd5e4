//! # 身份验证路由控制器
//!
//! 实现登录页、登录表单提交与登出。
//! 登录前不建立任何服务端会话，只有校验成功才写入会话表。

use axum::Form;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::middleware::auth::CurrentSession;
use crate::server::AppState;
use crate::session::{expired_cookie, session_cookie, session_id};
use crate::types::LoginForm;
use crate::view::login::render_login;

const INVALID_CREDENTIALS: &str = "Usuário ou senha incorretos";

/// # Summary
/// 登录页。
///
/// # Logic
/// 1. 已认证的会话直接跳转面板。
/// 2. 其余情况只渲染表单，不写入会话表。
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let authenticated = session_id(&headers)
        .and_then(|id| state.sessions.get(&id))
        .is_some_and(|session| session.authenticated);
    if authenticated {
        return Redirect::to("/").into_response();
    }

    Html(render_login(None, state.logo_path.is_some())).into_response()
}

/// # Summary
/// 登录表单提交。
///
/// # Logic
/// 1. 账号表校验失败时重新渲染表单并返回 401，不建立会话。
/// 2. 校验成功后丢弃请求携带的旧会话，建立新的已认证会话并下发 Cookie。
/// 3. 303 跳转面板。
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    if !state.credentials.authenticate(&form.username, &form.password) {
        tracing::warn!("Rejected login attempt for user '{}'", form.username);
        return (
            StatusCode::UNAUTHORIZED,
            Html(render_login(Some(INVALID_CREDENTIALS), state.logo_path.is_some())),
        )
            .into_response();
    }

    if let Some(previous) = session_id(&headers) {
        state.sessions.remove(&previous);
    }
    let session = state.sessions.create_authenticated(&form.username);

    tracing::info!("User '{}' logged in", form.username);
    ([(SET_COOKIE, session_cookie(&session.id))], Redirect::to("/")).into_response()
}

/// 登出：删除会话并清除 Cookie
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Response {
    state.sessions.remove(&session.id);
    tracing::info!(
        "User '{}' logged out",
        session.username.as_deref().unwrap_or_default()
    );
    ([(SET_COOKIE, expired_cookie())], Redirect::to("/login")).into_response()
}
