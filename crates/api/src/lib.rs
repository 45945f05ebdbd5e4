//! # `gratiam-api` - 报表面板 HTTP 层
//!
//! 本 crate 是 FIDC GRATIAM 报表面板的 HTTP 服务入口。
//! 使用 `axum` 构建路由与控制器，页面在服务端渲染为 HTML，图表交给浏览器端的 Plotly 绘制。
//!
//! ## 架构职责
//! - 访问门禁：静态账号表 + 会话 Cookie
//! - 调用 `SheetLoader` 加载四个分页，交给 `DashboardReport` 构建面板数据
//! - 将面板数据投影为 HTML，所有插值文本均经过转义

pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;
pub mod types;
pub mod view;
