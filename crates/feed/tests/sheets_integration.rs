use axum::Router;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use gratiam_core::config::SourceConfig;
use gratiam_core::source::error::DataSourceError;
use gratiam_core::source::port::SheetProvider;
use gratiam_feed::sheets::GoogleSheetsProvider;
use std::collections::HashMap;
use tokio::net::TcpListener;

const PDD_CSV: &str = "\"Data\",\"PDD Prevista \"\n\"01/03/2025\",\"1.000,00\"\n\"02/03/2025\",\"1.500,00\"\n";

// 模拟 gviz CSV 导出端点
async fn export(
    Path(spreadsheet_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if spreadsheet_id != "test-sheet-id" || params.get("tqx").map(String::as_str) != Some("out:csv")
    {
        return (StatusCode::NOT_FOUND, String::new());
    }
    match params.get("sheet").map(String::as_str) {
        Some("Pdd_Total_Previsto") => (StatusCode::OK, PDD_CSV.to_string()),
        Some("Html_Sheet") => (StatusCode::OK, "<html><body>login</body></html>".to_string()),
        _ => (StatusCode::BAD_REQUEST, "unknown sheet".to_string()),
    }
}

// 帮助函数：在随机端口启动模拟服务器
async fn spawn_mock_export() -> String {
    let app = Router::new().route("/spreadsheets/d/{id}/gviz/tq", get(export));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn provider(base_url: &str) -> GoogleSheetsProvider {
    let _ = rustls::crypto::ring::default_provider().install_default();
    GoogleSheetsProvider::new(&SourceConfig {
        base_url: base_url.to_string(),
        spreadsheet: format!("{}/spreadsheets/d/test-sheet-id/edit?usp=sharing", base_url),
        timeout_secs: 5,
    })
    .unwrap()
}

/// # Summary
/// 从模拟导出端点抓取分页并解析。
///
/// # Logic
/// 1. 分享链接中的 ID 被正确解析。
/// 2. 表头去空白，金额文本原样保留给下游解析。
#[tokio::test]
async fn test_fetch_sheet_from_export_endpoint() -> anyhow::Result<()> {
    let base_url = spawn_mock_export().await;
    let provider = provider(&base_url);

    let table = provider.fetch_sheet("Pdd_Total_Previsto").await?;
    assert_eq!(table.headers(), ["Data", "PDD Prevista"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1], vec!["02/03/2025", "1.500,00"]);
    Ok(())
}

#[tokio::test]
async fn test_fetch_sheet_maps_http_errors() {
    let base_url = spawn_mock_export().await;
    let provider = provider(&base_url);

    let err = provider.fetch_sheet("Inexistente").await.unwrap_err();
    assert_eq!(
        err,
        DataSourceError::Status {
            sheet: "Inexistente".to_string(),
            status: 400,
        }
    );

    let err = provider.fetch_sheet("Html_Sheet").await.unwrap_err();
    assert!(matches!(err, DataSourceError::Parse { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_sheet_network_failure() {
    // 绑定后立即释放端口，保证连接被拒绝
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let provider = provider(&addr);
    let err = provider.fetch_sheet("Pdd_Total_Previsto").await.unwrap_err();
    assert!(matches!(err, DataSourceError::Network { .. }), "got {:?}", err);
}
