use thiserror::Error;

/// # Summary
/// 启动阶段的错误枚举。
#[derive(Error, Debug)]
pub enum AppError {
    // 配置文件或环境变量无法解析
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    // 日志系统初始化失败
    #[error("Logging setup failed: {0}")]
    Logging(String),
    // 数据源驱动构建失败
    #[error("Data source setup failed: {0}")]
    Source(#[from] gratiam_core::source::error::DataSourceError),
    #[error("Server error: {0}")]
    Server(String),
}
