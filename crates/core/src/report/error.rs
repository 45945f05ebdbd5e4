use crate::common::Sheet;
use crate::common::brl::NumericFormatError;
use chrono::NaiveDate;
use thiserror::Error;

/// # Summary
/// 报表构建错误枚举。
///
/// # Invariants
/// - `MissingColumn`、`NumericFormat`、`Overflow`、`NoAnalysisDates` 为致命错误，中止本次报表。
/// - `NoDataForDate`、`MissingComparisonData` 可恢复，仅替换对应面板。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    // 分页缺少必需的列
    #[error("Sheet {sheet} has no column '{column}'")]
    MissingColumn { sheet: Sheet, column: &'static str },
    // 金额单元格格式错误
    #[error("Sheet {sheet}, column '{column}', row {row}: {source}")]
    NumericFormat {
        sheet: Sheet,
        column: &'static str,
        row: usize,
        #[source]
        source: NumericFormatError,
    },
    // 金额合计超出 Decimal 可表示范围
    #[error("Sheet {sheet}: amount total exceeds the supported range")]
    Overflow { sheet: Sheet },
    // 计提分页中没有任何有效的分析日期
    #[error("No analysis dates available")]
    NoAnalysisDates,
    // 所选分析日期没有数据
    #[error("No data for analysis date {0}")]
    NoDataForDate(NaiveDate),
    // 缺少对比所需的数据 (例如前一日记录)
    #[error("Insufficient data to compare against {0}")]
    MissingComparisonData(NaiveDate),
}

impl ReportError {
    /// 是否可以仅替换单个面板后继续渲染
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReportError::NoDataForDate(_) | ReportError::MissingComparisonData(_)
        )
    }
}
