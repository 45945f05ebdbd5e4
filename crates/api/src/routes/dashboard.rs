//! # 面板路由控制器
//!
//! 加载四个分页，构建面板数据并渲染为 HTML。

use axum::extract::{Query, State};
use axum::response::Html;
use chrono::NaiveDate;
use gratiam_core::common::Sheet;
use gratiam_core::source::error::DataSourceError;
use gratiam_report::dashboard::{DashboardReport, SheetTables};
use gratiam_source::loader::SheetLoader;

use crate::error::ApiError;
use crate::middleware::auth::CurrentSession;
use crate::server::AppState;
use crate::types::DashboardQuery;
use crate::view::dashboard::{ViewContext, render_dashboard};

/// # Summary
/// 面板主页 `GET /?date=YYYY-MM-DD`。
///
/// # Logic
/// 1. 解析查询参数中的分析日期；未指定时沿用本会话上一次的选择。
/// 2. 依次加载四个分页 (命中缓存时不访问远端)。
/// 3. 构建面板数据，把最终生效的分析日期记入会话。
/// 4. 渲染 HTML。
pub async fn show_dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let requested = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(text) => Some(parse_query_date(text)?),
        None => session.selected_date,
    };

    let tables = load_tables(&state.loader).await?;
    let report = DashboardReport::build(&tables, requested)?;
    state.sessions.remember_date(&session.id, report.analysis_date);

    let context = ViewContext {
        username: session.username,
        show_logo: state.logo_path.is_some(),
    };
    Ok(Html(render_dashboard(&report, &context)))
}

fn parse_query_date(text: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Data inválida: {}", text)))
}

/// 按固定顺序加载四个分页，任一失败即中止
async fn load_tables(loader: &SheetLoader) -> Result<SheetTables, DataSourceError> {
    Ok(SheetTables {
        accrual: loader.load(Sheet::Accrual.name()).await?,
        maturity: loader.load(Sheet::Maturity.name()).await?,
        provision: loader.load(Sheet::ProvisionForecast.name()).await?,
        final_provision: loader.load(Sheet::ProvisionMonthEnd.name()).await?,
    })
}
