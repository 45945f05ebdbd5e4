use crate::error::AppError;
use gratiam_core::config::AppConfig;
use std::path::Path;

/// 默认配置文件位置
pub const DEFAULT_CONFIG_PATH: &str = "config/gratiam.toml";
/// 指定配置文件位置的环境变量
pub const CONFIG_PATH_ENV: &str = "GRATIAM_CONFIG";
/// 覆盖单项配置的环境变量前缀，如 `GRATIAM__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "GRATIAM";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 配置文件路径取 `GRATIAM_CONFIG`，缺省为 `config/gratiam.toml`。
/// 2. 交给 `load_config_from` 叠加文件与环境变量。
pub fn load_config() -> Result<AppConfig, AppError> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config_from(Path::new(&path))
}

/// # Summary
/// 从指定文件加载配置，并叠加 `GRATIAM__*` 环境变量。
///
/// # Logic
/// 1. 文件可选，不存在时全部使用默认值。
/// 2. 环境变量优先级高于文件。
/// 3. 未出现的字段由 `AppConfig` 的 serde 默认值补齐。
pub fn load_config_from(path: &Path) -> Result<AppConfig, AppError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize::<AppConfig>()?)
}
