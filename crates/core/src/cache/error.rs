use thiserror::Error;

/// # Summary
/// 表格缓存错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    // 底层存储引擎故障
    #[error("Storage error: {0}")]
    Storage(String),
}
