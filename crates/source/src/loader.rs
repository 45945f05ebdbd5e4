use gratiam_cache::mem::MemTableCache;
use gratiam_core::cache::port::TableCache;
use gratiam_core::source::entity::Table;
use gratiam_core::source::error::DataSourceError;
use gratiam_core::source::port::SheetProvider;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// # Summary
/// 远程表格加载器 (Source Adapter)，为每个分页提供进程级记忆。
///
/// # Invariants
/// - 缓存归本实例所有，不是全局状态；进程重启即清空。
/// - 同名分页成功加载一次后不再访问远端。
/// - 失败结果不写入缓存，下次调用会重新抓取。
/// - 同一分页同一时刻至多一个抓取在途，并发的冷启动请求等待并复用其结果。
pub struct SheetLoader {
    // 原始表格数据源驱动
    provider: Arc<dyn SheetProvider>,
    // 分页名称 -> 已加载表格
    cache: Box<dyn TableCache>,
    // 分页名称 -> 抓取锁
    inflight: DashMap<String, Arc<Mutex<()>>>,
}

impl SheetLoader {
    /// # Summary
    /// 使用内存缓存创建加载器。
    ///
    /// # Arguments
    /// * `provider`: 满足 SheetProvider 接口的数据源驱动。
    ///
    /// # Returns
    /// 返回加载器的共享指针。
    pub fn new(provider: Arc<dyn SheetProvider>) -> Arc<Self> {
        Self::with_cache(provider, Box::new(MemTableCache::new()))
    }

    /// 使用指定的缓存实现创建加载器
    pub fn with_cache(provider: Arc<dyn SheetProvider>, cache: Box<dyn TableCache>) -> Arc<Self> {
        Arc::new(Self {
            provider,
            cache,
            inflight: DashMap::new(),
        })
    }

    /// # Summary
    /// 加载分页，命中缓存时直接返回。
    ///
    /// # Logic
    /// 1. 查询缓存，命中则返回共享表格。
    /// 2. 未命中则获取该分页的抓取锁，拿到锁后再查一次缓存。
    /// 3. 仍未命中才通过驱动抓取，成功后写入缓存。
    /// 4. 缓存读写故障只记录日志，不影响本次结果。
    ///
    /// # Arguments
    /// * `sheet`: 分页名称。
    ///
    /// # Returns
    /// 成功返回表格，抓取或解析失败返回 `DataSourceError`。
    pub async fn load(&self, sheet: &str) -> Result<Arc<Table>, DataSourceError> {
        if let Some(table) = self.cached(sheet).await {
            return Ok(table);
        }

        let lock = self
            .inflight
            .entry(sheet.to_string())
            .or_default()
            .value()
            .clone();
        let _guard = lock.lock().await;

        // 等锁期间可能已由其他请求加载完成
        if let Some(table) = self.cached(sheet).await {
            return Ok(table);
        }

        let table = Arc::new(self.provider.fetch_sheet(sheet).await?);
        if let Err(e) = self.cache.put(sheet, Arc::clone(&table)).await {
            warn!("Failed to cache sheet {}: {}", sheet, e);
        }
        info!("Sheet {} loaded and memoized", sheet);
        Ok(table)
    }

    async fn cached(&self, sheet: &str) -> Option<Arc<Table>> {
        match self.cache.get(sheet).await {
            Ok(Some(table)) => {
                debug!("Sheet {} served from cache", sheet);
                Some(table)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Cache lookup failed for sheet {}: {}", sheet, e);
                None
            }
        }
    }

    /// 已记忆的分页数量
    pub fn cached_sheets(&self) -> usize {
        self.cache.len()
    }
}
