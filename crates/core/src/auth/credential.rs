use crate::auth::entity::Credential;
use std::collections::HashMap;

/// # Summary
/// 访问门禁使用的静态账号表。
///
/// # Invariants
/// - 启动时由配置构建，之后只读。
/// - 用户名重复时以最后一条为准。
#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    entries: HashMap<String, String>,
}

impl CredentialTable {
    /// # Summary
    /// 从配置中的账号列表构建账号表。
    ///
    /// # Arguments
    /// * `credentials`: 用户名/密码对。
    pub fn new(credentials: &[Credential]) -> Self {
        let entries = credentials
            .iter()
            .map(|c| (c.username.clone(), c.password.clone()))
            .collect();
        Self { entries }
    }

    /// # Summary
    /// 校验用户名与密码。
    ///
    /// # Logic
    /// 1. 按用户名查找。
    /// 2. 明文比对密码。
    ///
    /// # Returns
    /// 两者均匹配返回 true。
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.entries
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    /// 已登记的账号数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
