//! # API 服务启动器
//!
//! 组装 axum 路由、挂载访问门禁与请求追踪，并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 组装状态后调用。

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use gratiam_core::auth::credential::CredentialTable;
use gratiam_source::loader::SheetLoader;
use tokio::net::TcpListener;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::routes::{auth, dashboard};
use crate::session::SessionStore;

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - `loader` 的缓存与进程同寿命，面板渲染不会重复抓取同一分页。
/// - `logo_path` 仅在启动时确认文件存在后才会设置。
#[derive(Clone)]
pub struct AppState {
    /// 远程分页加载器 (带缓存)
    pub loader: Arc<SheetLoader>,
    /// 静态账号表
    pub credentials: Arc<CredentialTable>,
    /// 会话表
    pub sessions: Arc<SessionStore>,
    /// 品牌 Logo 文件
    pub logo_path: Option<PathBuf>,
}

// ============================================================
//  服务构建与启动
// ============================================================

/// # Summary
/// 构建完整的路由树。
///
/// # Logic
/// 1. 公开路由：登录页、登录提交、健康检查、Logo。
/// 2. 受保护路由：面板与登出，挂载 `require_session`。
/// 3. 整体挂载 HTTP 追踪层。
pub fn build_router(state: AppState) -> Router {
    let protected_router = Router::new()
        .route("/", get(dashboard::show_dashboard))
        .route("/logout", post(auth::logout))
        // 仅对已匹配的路由生效，未知路径仍返回 404
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_session,
        ));

    let mut public_router = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/health", get(|| async { "ok" }));

    if let Some(path) = &state.logo_path {
        public_router = public_router.route_service("/static/logo", ServeFile::new(path));
    }

    public_router
        .merge(protected_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// 构建路由树并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由 `crates/app` 组装的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8501"`
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("GRATIAM dashboard listening on http://{}", bind_addr);

    let listener = TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
