mod error;
mod logging;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use gratiam_api::server::{AppState, start_server};
use gratiam_api::session::SessionStore;
use gratiam_core::auth::credential::CredentialTable;
use gratiam_feed::sheets::GoogleSheetsProvider;
use gratiam_source::loader::SheetLoader;
use tracing::{info, warn};

use crate::error::AppError;

/// # Summary
/// 应用启动入口，纯粹的组装层。
/// 负责加载配置、实例化具体实现并通过 `Arc<dyn Trait>` 注入 HTTP 层。
///
/// # Logic
/// 1. 加载配置并初始化全局日志。
/// 2. 安装 rustls 加密后端。
/// 3. 实例化基础设施层（表格驱动、带缓存的加载器）。
/// 4. 构建账号表与会话表，检查 Logo 文件。
/// 5. 启动 HTTP 服务，直到收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 配置与日志
    let config = settings::load_config()?;
    let _log_guard = logging::init_logging(&config.logging)?;
    info!("GRATIAM dashboard starting...");

    // 2. TLS 后端
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider is already installed, keeping it");
    }

    // 3. 基础设施层
    let provider = Arc::new(GoogleSheetsProvider::new(&config.source)?);
    let loader = SheetLoader::new(provider);
    info!(
        "Reading spreadsheet {} from {}",
        config.source.spreadsheet_id(),
        config.source.base_url
    );

    // 4. 门禁与静态资源
    let credentials = CredentialTable::new(&config.auth.users);
    if credentials.is_empty() {
        warn!("No users configured, nobody will be able to log in");
    }
    let state = AppState {
        loader,
        credentials: Arc::new(credentials),
        sessions: Arc::new(SessionStore::new()),
        logo_path: resolve_logo(&config.assets.logo_path),
    };

    // 5. 启动服务
    let bind_addr = config.server.bind_addr();
    tokio::select! {
        result = start_server(state, &bind_addr) => {
            result.map_err(|e| AppError::Server(e.to_string()))?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}

/// Logo 文件不存在时只告警一次，页面不显示图片
fn resolve_logo(path: &str) -> Option<PathBuf> {
    let path = PathBuf::from(path);
    if path.is_file() {
        Some(path)
    } else {
        warn!("Logo not found at {}, pages will render without it", path.display());
        None
    }
}
