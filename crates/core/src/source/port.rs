use crate::source::entity::Table;
use crate::source::error::DataSourceError;
use async_trait::async_trait;

/// # Summary
/// 远程表格数据源驱动接口 (Port)。
///
/// # Invariants
/// - 每次调用都直接访问远端，不做任何缓存；缓存由 `SheetLoader` 负责。
#[async_trait]
pub trait SheetProvider: Send + Sync {
    /// # Summary
    /// 拉取指定分页并解析为表格。
    ///
    /// # Arguments
    /// * `sheet`: 分页名称。
    ///
    /// # Returns
    /// 成功返回表头已去空白的 `Table`，失败返回 `DataSourceError`。
    async fn fetch_sheet(&self, sheet: &str) -> Result<Table, DataSourceError>;
}
