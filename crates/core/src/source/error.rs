use thiserror::Error;

/// # Summary
/// 远程表格数据源错误枚举，处理网络、HTTP 状态及 CSV 解析问题。
///
/// # Invariants
/// - 任一变体都会中止本次报表生成，不展示任何部分结果。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    // HTTP 客户端构建失败
    #[error("HTTP client error: {0}")]
    Client(String),
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error while fetching sheet {sheet}: {message}")]
    Network { sheet: String, message: String },
    // 远端返回非 2xx 状态
    #[error("Sheet {sheet} returned HTTP {status}")]
    Status { sheet: String, status: u16 },
    // 响应内容无法解析为带表头的分隔文本
    #[error("Failed to parse sheet {sheet}: {message}")]
    Parse { sheet: String, message: String },
    // 响应中没有表头
    #[error("Sheet {0} is empty")]
    Empty(String),
}
