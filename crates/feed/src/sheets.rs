use async_trait::async_trait;
use csv::ReaderBuilder;
use gratiam_core::config::SourceConfig;
use gratiam_core::source::entity::Table;
use gratiam_core::source::error::DataSourceError;
use gratiam_core::source::port::SheetProvider;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// # Summary
/// 已发布 Google 表格的 CSV 导出驱动。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - 每次调用都访问远端，缓存由上层 `SheetLoader` 负责。
#[derive(Clone)]
pub struct GoogleSheetsProvider {
    // 内部使用的 HTTP 客户端
    client: Client,
    // 例如 https://docs.google.com
    base_url: String,
    // 表格 ID
    spreadsheet_id: String,
}

impl GoogleSheetsProvider {
    /// # Summary
    /// 按配置创建驱动。
    ///
    /// # Logic
    /// 1. 按 `timeout_secs` 配置请求超时。
    /// 2. 从表格 ID 或分享链接中解析出 ID。
    /// 3. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 数据源配置。
    ///
    /// # Returns
    /// 客户端构建失败时返回 `DataSourceError::Client`。
    pub fn new(config: &SourceConfig) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("gratiam-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataSourceError::Client(e.to_string()))?;

        Ok(Self::with_client(
            client,
            &config.base_url,
            config.spreadsheet_id(),
        ))
    }

    /// 使用现成的 HTTP 客户端创建驱动
    pub fn with_client(client: Client, base_url: &str, spreadsheet_id: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
        }
    }

    /// CSV 导出端点 (不含查询参数)
    pub fn export_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq",
            self.base_url, self.spreadsheet_id
        )
    }
}

#[async_trait]
impl SheetProvider for GoogleSheetsProvider {
    /// # Summary
    /// 拉取单个分页的 CSV 导出。
    ///
    /// # Logic
    /// 1. 以 `tqx=out:csv&sheet={sheet}` 请求导出端点。
    /// 2. 非 2xx 状态直接报错。
    /// 3. 读取响应文本并解析为表格。
    async fn fetch_sheet(&self, sheet: &str) -> Result<Table, DataSourceError> {
        let url = self.export_url();
        debug!("Fetching sheet {} from {}", sheet, url);

        let resp = self
            .client
            .get(&url)
            .query(&[("tqx", "out:csv"), ("sheet", sheet)])
            .send()
            .await
            .map_err(|e| DataSourceError::Network {
                sheet: sheet.to_string(),
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(DataSourceError::Status {
                sheet: sheet.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| DataSourceError::Network {
            sheet: sheet.to_string(),
            message: e.to_string(),
        })?;

        let table = parse_csv(sheet, &body)?;
        info!("Fetched sheet {} ({} rows)", sheet, table.len());
        Ok(table)
    }
}

/// # Summary
/// 将带表头的 CSV 文本解析为 `Table`。
///
/// # Logic
/// 1. 去掉 UTF-8 BOM；空响应视为 `Empty`。
/// 2. HTML 响应 (例如登录页或错误页) 视为解析失败。
/// 3. 允许数据行长度与表头不一致。
///
/// # Arguments
/// * `sheet`: 分页名称，仅用于错误信息。
/// * `body`: 响应文本。
pub fn parse_csv(sheet: &str, body: &str) -> Result<Table, DataSourceError> {
    let body = body.trim_start_matches('\u{feff}');
    if body.trim().is_empty() {
        return Err(DataSourceError::Empty(sheet.to_string()));
    }
    if body.trim_start().starts_with('<') {
        return Err(DataSourceError::Parse {
            sheet: sheet.to_string(),
            message: "unexpected HTML response".to_string(),
        });
    }

    let parse_err = |e: csv::Error| DataSourceError::Parse {
        sheet: sheet.to_string(),
        message: e.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DataSourceError::Empty(sheet.to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, rows))
}
