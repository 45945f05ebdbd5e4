//! # 会话存储
//!
//! 每个浏览器会话一条 `SessionContext`，以 Cookie 中的随机 ID 关联。
//! 会话只存在于进程内存中，重启后所有用户需重新登录。

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use chrono::NaiveDate;
use dashmap::DashMap;
use gratiam_core::auth::entity::SessionContext;
use uuid::Uuid;

/// 会话 Cookie 名称
pub const SESSION_COOKIE: &str = "gratiam_session";

/// # Summary
/// 进程内会话表。
///
/// # Invariants
/// - 会话 ID 由 UUID v4 生成，不可预测。
/// - 只有通过门禁后才会建立会话，匿名访问不占用任何服务端状态。
/// - 未知 ID 的查询一律视为无会话。
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, SessionContext>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为已通过门禁的用户创建新会话
    pub fn create_authenticated(&self, username: &str) -> SessionContext {
        let mut session = SessionContext::new(Uuid::new_v4().to_string());
        session.mark_authenticated(username);
        self.sessions.insert(session.id.clone(), session.clone());
        session
    }

    /// 按 ID 获取会话快照
    pub fn get(&self, id: &str) -> Option<SessionContext> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    /// 记住本会话最近一次的分析日期
    pub fn remember_date(&self, id: &str, date: NaiveDate) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session.selected_date = Some(date);
        }
    }

    pub fn remove(&self, id: &str) {
        self.sessions.remove(id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// # Summary
/// 从请求头中取出会话 Cookie 的值。
///
/// # Logic
/// 1. 遍历所有 `Cookie` 头 (浏览器可能发送多个)。
/// 2. 按 `;` 拆分为 `name=value` 对，返回第一个名称匹配且非空的值。
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// 设置会话 Cookie 的 `Set-Cookie` 值
pub fn session_cookie(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// 清除会话 Cookie 的 `Set-Cookie` 值
pub fn expired_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", SESSION_COOKIE)
}
