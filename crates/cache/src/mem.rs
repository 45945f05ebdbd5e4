use async_trait::async_trait;
use dashmap::DashMap;
use gratiam_core::cache::error::CacheError;
use gratiam_core::cache::port::TableCache;
use gratiam_core::source::entity::Table;
use std::sync::Arc;

/// # Summary
/// 基于 DashMap 的内存表格缓存。
///
/// # Invariants
/// - 所有操作均通过并发哈希表 `DashMap` 执行，保证多线程安全。
/// - 不提供自动过期或容量限制，进程重启即清空。
pub struct MemTableCache {
    // 分页名称 -> 共享表格
    storage: DashMap<String, Arc<Table>>,
}

impl MemTableCache {
    /// # Summary
    /// 创建一个空的 MemTableCache 实例。
    ///
    /// # Returns
    /// * `Self` - 初始化的缓存实例。
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }
}

impl Default for MemTableCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableCache for MemTableCache {
    /// # Summary
    /// 读取已缓存的表格。
    ///
    /// # Logic
    /// 从哈希表中检索 Key，命中时仅克隆 `Arc` 指针。
    async fn get(&self, key: &str) -> Result<Option<Arc<Table>>, CacheError> {
        Ok(self.storage.get(key).map(|v| Arc::clone(v.value())))
    }

    /// # Summary
    /// 写入表格。
    ///
    /// # Logic
    /// 将 Key 转换为 String 后与表格一并插入哈希表。若存在同名 Key 则覆盖。
    async fn put(&self, key: &str, table: Arc<Table>) -> Result<(), CacheError> {
        self.storage.insert(key.to_string(), table);
        Ok(())
    }

    fn len(&self) -> usize {
        self.storage.len()
    }
}
