use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// # Summary
/// 静态账号表中的一条用户名/密码记录。
///
/// # Invariants
/// - 明文保存，仅适用于低风险的内部面板。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// # Summary
/// 单个浏览器会话的上下文，取代进程级的全局"已登录"标记。
///
/// # Invariants
/// - `authenticated` 一旦置为 true，在本会话剩余生命周期内保持不变。
/// - `username` 仅在 `authenticated` 为 true 时有值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    // 会话唯一标识 (Cookie 值)
    pub id: String,
    // 是否已通过门禁
    pub authenticated: bool,
    // 登录用户名
    pub username: Option<String>,
    // 最近一次选择的分析日期
    pub selected_date: Option<NaiveDate>,
}

impl SessionContext {
    /// 创建一个未认证的会话
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            authenticated: false,
            username: None,
            selected_date: None,
        }
    }

    /// 标记会话已通过门禁
    pub fn mark_authenticated(&mut self, username: &str) {
        self.authenticated = true;
        self.username = Some(username.to_string());
    }
}
