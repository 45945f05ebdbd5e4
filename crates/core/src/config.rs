use crate::auth::entity::Credential;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub auth: AuthConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
        }
    }
}

impl ServerConfig {
    /// `host:port` 形式的监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// # Summary
/// 远程表格数据源配置。
///
/// # Invariants
/// - `spreadsheet` 既可以是表格 ID，也可以是完整的分享链接。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub spreadsheet: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://docs.google.com".to_string(),
            spreadsheet: "1XovoHw_Cot40MD-lxcmVyKaQUPlTcK1b3bNzIpxp1XM".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    /// # Summary
    /// 解析出表格 ID。
    ///
    /// # Logic
    /// 1. 若配置为分享链接，取 `/d/` 之后的路径段。
    /// 2. 否则原样返回。
    pub fn spreadsheet_id(&self) -> &str {
        let raw = self.spreadsheet.trim();
        match raw.split_once("/d/") {
            Some((_, rest)) => rest.split('/').next().unwrap_or(rest),
            None => raw,
        }
    }
}

/// 访问门禁的静态账号表
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub users: Vec<Credential>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        // Default for dev, should be overwritten by config
        let users = [
            ("gestao", "gratiam-gestao"),
            ("risco", "gratiam-risco"),
            ("diretoria", "gratiam-diretoria"),
        ]
        .into_iter()
        .map(|(username, password)| Credential {
            username: username.to_string(),
            password: password.to_string(),
        })
        .collect();
        Self { users }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub logo_path: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            logo_path: "assets/logo.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` 指令，`RUST_LOG` 优先
    pub level: String,
    /// 设置后额外按天滚动写入该目录
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8501");
        assert_eq!(config.source.base_url, "https://docs.google.com");
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.auth.users.len(), 3);
        assert_eq!(config.assets.logo_path, "assets/logo.png");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_spreadsheet_id_from_share_url() {
        let source = SourceConfig {
            spreadsheet: "https://docs.google.com/spreadsheets/d/abc123XYZ/edit?usp=sharing"
                .to_string(),
            ..SourceConfig::default()
        };
        assert_eq!(source.spreadsheet_id(), "abc123XYZ");

        let source = SourceConfig {
            spreadsheet: " abc123XYZ ".to_string(),
            ..SourceConfig::default()
        };
        assert_eq!(source.spreadsheet_id(), "abc123XYZ");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server": {"port": 9000}, "source": {"timeout_secs": 5}}"#)
                .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.source.timeout_secs, 5);
        assert_eq!(config.auth.users.len(), 3);
    }
}
