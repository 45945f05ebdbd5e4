//! 面板页：图表、PDD 表格与四个指标卡片。

use chrono::NaiveDate;
use gratiam_core::common::brl::{format_brl, format_pct};
use gratiam_core::common::date::{format_date, format_day_month};
use gratiam_core::report::entity::{DatePoint, Phase, VariationBand};
use gratiam_core::report::error::ReportError;
use gratiam_report::dashboard::{DashboardReport, ProvisionRow};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::view::layout::{PAGE_TITLE, PLACEHOLDER, escape, logo_img, page, script_json};

const NO_ACCRUAL: &str = "Nenhum dado de apropriação encontrado para esta data.";
const NO_MATURITY: &str = "Nenhum dado de vencimento encontrado para esta data.";
const NO_PROVISION: &str = "Nenhum dado de PDD encontrado.";
const INSUFFICIENT_DATA: &str = "Dados insuficientes para comparação com o dia anterior.";

/// 与会话相关、不属于面板数据的展示信息
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    pub username: Option<String>,
    pub show_logo: bool,
}

/// # Summary
/// 渲染面板页。
///
/// # Logic
/// 1. 顶栏：Logo、带分析日期的标题、当前用户与登出按钮。
/// 2. 日期选择器，范围限制在可选分析日期之间。
/// 3. 计提与到期图表，右侧为计提合计卡片。
/// 4. PDD 图表与表格，右侧为最关键日、月末预计与 D-1 变动卡片。
/// 5. 可恢复错误只替换对应面板。
pub fn render_dashboard(report: &DashboardReport, ctx: &ViewContext) -> String {
    let body = format!(
        r#"{header}
{selector}
<div class="grid">
<section>
<h2>Valor Apropriado Diário</h2>
<div class="panel">{accrual}</div>
<h2>Vencimentos por Data</h2>
<div class="panel">{maturity}</div>
</section>
<aside>
{accrued}
</aside>
</div>
<h2>Análise PDD</h2>
<div class="grid">
<section>
{provision}
</section>
<aside>
{critical}
{month_end}
{day_over_day}
</aside>
</div>"#,
        header = render_header(report.analysis_date, ctx),
        selector = render_date_selector(report),
        accrual = recoverable(&report.accrual_by_date, NO_ACCRUAL, |points| {
            line_chart("chart-accrual", json!([date_trace("Valor apropriado", points)]))
        }),
        maturity = recoverable(&report.maturity_by_date, NO_MATURITY, |points| {
            line_chart("chart-maturity", json!([date_trace("Valor nominal", points)]))
        }),
        accrued = metric(
            "Soma do Valor Apropriado no Período",
            &format_brl(report.accrued_total),
            None
        ),
        provision = recoverable(&report.provision_rows, NO_PROVISION, |rows| {
            format!(
                r#"<div class="panel">{}</div>{}"#,
                line_chart("chart-provision", provision_traces(rows)),
                provision_table(rows)
            )
        }),
        critical = render_critical_day(report),
        month_end = metric(
            &format!(
                "PDD prevista para o fim do mês ({})",
                format_date(report.month_end.month_end)
            ),
            &format_brl(report.month_end.total),
            None
        ),
        day_over_day = render_day_over_day(report),
    );

    page(PAGE_TITLE, &body, true)
}

fn render_header(analysis_date: NaiveDate, ctx: &ViewContext) -> String {
    let user = ctx
        .username
        .as_deref()
        .map(|u| format!(r#"<span class="user">{}</span>"#, escape(u)))
        .unwrap_or_default();
    format!(
        r#"<header class="topbar">
{logo}
<h1>{title} - Data da análise: {date}</h1>
{user}
<form method="post" action="/logout"><button type="submit">Sair</button></form>
</header>"#,
        logo = logo_img(ctx.show_logo),
        title = escape(PAGE_TITLE),
        date = format_date(analysis_date),
        user = user,
    )
}

fn render_date_selector(report: &DashboardReport) -> String {
    format!(
        r#"<form class="date-selector" method="get" action="/">
<label for="date">Selecione a data de análise:</label>
<input id="date" name="date" type="date" value="{value}" min="{min}" max="{max}">
<button type="submit">Aplicar</button>
</form>"#,
        value = iso(report.analysis_date),
        min = iso(report.available.first),
        max = iso(report.available.last),
    )
}

fn render_critical_day(report: &DashboardReport) -> String {
    const LABEL: &str = "O dia mais crítico para o fundo será o dia";
    match &report.critical_day {
        Some(day) => metric(
            LABEL,
            &format!(
                "{}, com variação de {}",
                format_day_month(day.date),
                format_pct(day.pct_change)
            ),
            None,
        ),
        None => metric(
            LABEL,
            PLACEHOLDER,
            Some("Sem variação prevista após a data de análise"),
        ),
    }
}

fn render_day_over_day(report: &DashboardReport) -> String {
    const LABEL: &str = "Variação da PDD Final (D-1)";
    match &report.day_over_day {
        Ok(dod) => metric(
            LABEL,
            &pct_or_placeholder(dod.pct_change),
            Some(&format!(
                "Hoje {} | Ontem {}",
                format_brl(dod.today),
                format_brl(dod.yesterday)
            )),
        ),
        Err(err) => format!(
            r#"<div class="metric-container"><div class="metric-label">{}</div>{}</div>"#,
            escape(LABEL),
            notice(err, INSUFFICIENT_DATA)
        ),
    }
}

/// # Summary
/// 渲染可恢复面板：成功时调用 `render`，失败时换成提示框。
fn recoverable<T>(
    result: &Result<T, ReportError>,
    no_data: &str,
    render: impl FnOnce(&T) -> String,
) -> String {
    match result {
        Ok(value) => render(value),
        Err(err) => notice(err, no_data),
    }
}

fn notice(err: &ReportError, no_data: &str) -> String {
    match err {
        ReportError::NoDataForDate(_) => {
            format!(r#"<div class="warning">{}</div>"#, escape(no_data))
        }
        ReportError::MissingComparisonData(_) => {
            format!(r#"<div class="info">{}</div>"#, escape(INSUFFICIENT_DATA))
        }
        other => format!(r#"<div class="warning">{}</div>"#, escape(&other.to_string())),
    }
}

fn metric(label: &str, value: &str, detail: Option<&str>) -> String {
    let detail = detail
        .map(|d| format!(r#"<div class="metric-detail">{}</div>"#, escape(d)))
        .unwrap_or_default();
    format!(
        r#"<div class="metric-container"><div class="metric-label">{}</div><div class="metric-value">{}</div>{}</div>"#,
        escape(label),
        escape(value),
        detail
    )
}

fn provision_table(rows: &[ProvisionRow]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            let phase_class = match row.phase {
                Phase::Realized => "realized",
                Phase::Forecast => "forecast",
            };
            format!(
                r#"<tr class="{}"><td>{}</td><td>{}</td><td class="{}">{}</td><td>{}</td></tr>"#,
                phase_class,
                format_date(row.date),
                escape(&format_brl(row.total_provision)),
                band_class(row.band),
                escape(&pct_or_placeholder(row.pct_change)),
                escape(&row.phase.to_string()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<table class="pdd">
<thead><tr><th>Data</th><th>Total PDD</th><th>Variação</th><th>Situação</th></tr></thead>
<tbody>
{}
</tbody>
</table>"#,
        body
    )
}

/// 变动分档对应的单元格样式
fn band_class(band: VariationBand) -> &'static str {
    match band {
        VariationBand::Normal => "var-normal",
        VariationBand::HighPositive => "var-high-positive",
        VariationBand::HighNegative => "var-high-negative",
    }
}

fn pct_or_placeholder(pct: Option<Decimal>) -> String {
    pct.map(format_pct).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn date_trace(name: &str, points: &[DatePoint]) -> Value {
    let x: Vec<String> = points.iter().map(|p| iso(p.date)).collect();
    let y: Vec<Decimal> = points.iter().map(|p| p.value).collect();
    json!({
        "x": x,
        "y": y,
        "name": name,
        "type": "scatter",
        "mode": "lines+markers",
        "line": {"width": 3},
        "marker": {"size": 6},
    })
}

/// PDD 图表：已实现与预测两条曲线
fn provision_traces(rows: &[ProvisionRow]) -> Value {
    let trace = |phase: Phase, dash: &str| {
        let selected: Vec<&ProvisionRow> = rows.iter().filter(|r| r.phase == phase).collect();
        let x: Vec<String> = selected.iter().map(|r| iso(r.date)).collect();
        let y: Vec<Decimal> = selected.iter().map(|r| r.total_provision).collect();
        json!({
            "x": x,
            "y": y,
            "name": phase.to_string(),
            "type": "scatter",
            "mode": "lines+markers",
            "line": {"width": 3, "dash": dash},
            "marker": {"size": 6},
        })
    };
    json!([trace(Phase::Realized, "solid"), trace(Phase::Forecast, "dash")])
}

fn line_chart(id: &str, traces: Value) -> String {
    let layout = json!({
        "separators": ",.",
        "plot_bgcolor": "#f0f4ff",
        "paper_bgcolor": "#f0f4ff",
        "margin": {"l": 70, "r": 40, "t": 20, "b": 40},
        "xaxis": {"title": {"text": "Data"}},
        "yaxis": {"title": {"text": "Valor (R$)"}, "tickformat": ",.2f"},
    });
    format!(
        r#"<div id="{id}" class="chart"></div>
<script>Plotly.newPlot("{id}", {data}, {layout}, {{"responsive": true, "displaylogo": false}});</script>"#,
        id = id,
        data = script_json(&traces),
        layout = script_json(&layout),
    )
}
