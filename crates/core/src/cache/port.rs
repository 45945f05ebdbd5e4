use crate::cache::error::CacheError;
use crate::source::entity::Table;
use async_trait::async_trait;
use std::sync::Arc;

/// # Summary
/// 按分页名称记忆已加载表格的 KV 存储接口 (Port)。
///
/// # Invariants
/// - 值以 `Arc<Table>` 共享，命中时不复制表格内容。
/// - 不提供过期策略；条目生命周期与持有它的加载器相同。
#[async_trait]
pub trait TableCache: Send + Sync {
    /// # Summary
    /// 读取已缓存的表格。
    ///
    /// # Arguments
    /// * `key`: 分页名称。
    ///
    /// # Returns
    /// 命中返回 `Some`，否则返回 `None`。
    async fn get(&self, key: &str) -> Result<Option<Arc<Table>>, CacheError>;

    /// # Summary
    /// 写入表格，同名键直接覆盖。
    async fn put(&self, key: &str, table: Arc<Table>) -> Result<(), CacheError>;

    /// 当前缓存条目数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
