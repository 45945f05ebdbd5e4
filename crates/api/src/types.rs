//! # 请求载荷定义
//!
//! 登录表单与面板查询参数。

use serde::Deserialize;

/// 登录表单 (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// # Summary
/// 面板查询参数。
///
/// # Invariants
/// - `date` 为 `YYYY-MM-DD`；空字符串视为未指定。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
}
