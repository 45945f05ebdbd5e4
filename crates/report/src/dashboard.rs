use crate::builder::{
    available_analysis_dates, build_provision_series, classify_realized_vs_forecast,
    classify_variation, day_over_day_final_provision, filter_by_analysis_date,
    most_critical_future_day, month_end_total, sum_by_date, sum_column,
};
use crate::extract::{
    extract_accruals, extract_final_provisions, extract_maturities, extract_provisions,
};
use chrono::NaiveDate;
use gratiam_core::common::Sheet;
use gratiam_core::common::date::last_day_of_month;
use gratiam_core::report::entity::{
    CriticalDay, DatePoint, DayOverDay, MonthEndForecast, Phase, VariationBand,
};
use gratiam_core::report::error::ReportError;
use gratiam_core::source::entity::Table;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// # Summary
/// 一次渲染所需的四张原始表格。
#[derive(Debug, Clone)]
pub struct SheetTables {
    pub accrual: Arc<Table>,
    pub maturity: Arc<Table>,
    pub provision: Arc<Table>,
    pub final_provision: Arc<Table>,
}

/// 可选分析日期的闭区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateRange {
    /// 将日期限制在区间内
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.first, self.last)
    }
}

/// # Summary
/// PDD 表格中的一行，已附带展示所需的阶段与高亮分档。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRow {
    pub date: NaiveDate,
    pub total_provision: Decimal,
    pub pct_change: Option<Decimal>,
    pub phase: Phase,
    pub band: VariationBand,
}

/// # Summary
/// 面板的完整数据模型，渲染层只做投影。
///
/// # Invariants
/// - `analysis_date` 总是落在 `available` 区间内。
/// - `Err` 字段只会是可恢复错误 (`NoDataForDate` / `MissingComparisonData`)。
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub analysis_date: NaiveDate,
    pub available: DateRange,
    // 计提按日期汇总
    pub accrual_by_date: Result<Vec<DatePoint>, ReportError>,
    // 到期按日期汇总
    pub maturity_by_date: Result<Vec<DatePoint>, ReportError>,
    // 所选分析日期的计提合计
    pub accrued_total: Decimal,
    pub provision_rows: Result<Vec<ProvisionRow>, ReportError>,
    pub critical_day: Option<CriticalDay>,
    pub month_end: MonthEndForecast,
    pub day_over_day: Result<DayOverDay, ReportError>,
}

impl DashboardReport {
    /// # Summary
    /// 由四张表格构建面板数据。
    ///
    /// # Logic
    /// 1. 提取强类型记录；缺列、金额格式错误或合计溢出直接中止。
    /// 2. 由计提记录确定可选日期区间，请求日期越界时收敛到边界，缺省取最新日期。
    /// 3. 按分析日期筛选计提与到期，生成图表序列与合计。
    /// 4. 构建 PDD 序列，标注阶段与高亮分档，并找出未来最关键的一天。
    /// 5. 计算月末预计 PDD 与月末快照环比。
    ///
    /// # Arguments
    /// * `tables`: 已加载的原始表格。
    /// * `requested`: 用户选择的分析日期。
    ///
    /// # Returns
    /// 成功返回面板数据；致命错误返回 `ReportError`。
    pub fn build(tables: &SheetTables, requested: Option<NaiveDate>) -> Result<Self, ReportError> {
        let accruals = extract_accruals(&tables.accrual)?;
        let maturities = extract_maturities(&tables.maturity)?;
        let provisions = extract_provisions(&tables.provision)?;
        let final_provisions = extract_final_provisions(&tables.final_provision)?;

        let dates = available_analysis_dates(&accruals);
        let available = match (dates.first(), dates.last()) {
            (Some(&first), Some(&last)) => DateRange { first, last },
            _ => return Err(ReportError::NoAnalysisDates),
        };
        let analysis_date = requested
            .map(|d| available.clamp(d))
            .unwrap_or(available.last);

        let accruals_on_date = filter_by_analysis_date(&accruals, analysis_date);
        let accrual_overflow = ReportError::Overflow {
            sheet: Sheet::Accrual,
        };
        let accrued_total = sum_column(&accruals_on_date, |r| r.appropriated_value)
            .ok_or(accrual_overflow.clone())?;
        let accrual_by_date = non_empty(
            sum_by_date(&accruals_on_date, |r| r.event_date, |r| r.appropriated_value)
                .ok_or(accrual_overflow)?,
            analysis_date,
        );

        let maturities_on_date = filter_by_analysis_date(&maturities, analysis_date);
        let maturity_by_date = non_empty(
            sum_by_date(&maturities_on_date, |r| r.event_date, |r| r.nominal_value).ok_or(
                ReportError::Overflow {
                    sheet: Sheet::Maturity,
                },
            )?,
            analysis_date,
        );

        let series = build_provision_series(&provisions)?;
        let critical_day = most_critical_future_day(&series, analysis_date);
        let provision_rows = non_empty(
            classify_realized_vs_forecast(&series, analysis_date)
                .into_iter()
                .map(|tagged| ProvisionRow {
                    date: tagged.point.date,
                    total_provision: tagged.point.total_provision,
                    pct_change: tagged.point.pct_change,
                    phase: tagged.phase,
                    band: classify_variation(tagged.point.pct_change),
                })
                .collect(),
            analysis_date,
        );

        let month_end = MonthEndForecast {
            month_end: last_day_of_month(analysis_date),
            total: month_end_total(&provisions, analysis_date)?,
        };

        let day_over_day = day_over_day_final_provision(&final_provisions, analysis_date)?
            .ok_or(ReportError::MissingComparisonData(analysis_date));

        info!(
            "Built dashboard for {} (accruals: {}, maturities: {}, provision points: {})",
            analysis_date,
            accruals_on_date.len(),
            maturities_on_date.len(),
            series.len()
        );

        Ok(Self {
            analysis_date,
            available,
            accrual_by_date,
            maturity_by_date,
            accrued_total,
            provision_rows,
            critical_day,
            month_end,
            day_over_day,
        })
    }
}

fn non_empty<T>(items: Vec<T>, analysis_date: NaiveDate) -> Result<Vec<T>, ReportError> {
    if items.is_empty() {
        Err(ReportError::NoDataForDate(analysis_date))
    } else {
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_clamp() {
        let range = DateRange {
            first: ymd(2025, 3, 1),
            last: ymd(2025, 3, 3),
        };
        assert_eq!(range.clamp(ymd(2025, 2, 1)), ymd(2025, 3, 1));
        assert_eq!(range.clamp(ymd(2025, 3, 2)), ymd(2025, 3, 2));
        assert_eq!(range.clamp(ymd(2026, 1, 1)), ymd(2025, 3, 3));
    }
}
