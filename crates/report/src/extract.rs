use chrono::NaiveDate;
use gratiam_core::common::Sheet;
use gratiam_core::common::brl::parse_brl;
use gratiam_core::common::date::{DateOrder, parse_date};
use gratiam_core::report::entity::{
    AccrualRecord, FinalProvisionRecord, MaturityRecord, ProvisionRecord,
};
use gratiam_core::report::error::ReportError;
use gratiam_core::source::entity::Table;
use rust_decimal::Decimal;
use tracing::warn;

/// 各分页使用的表头名称
pub mod columns {
    pub const ANALYSIS_DATE: &str = "Dia_Analise";
    pub const EVENT_DATE: &str = "DATA";
    pub const APPROPRIATED_VALUE: &str = "VALOR_APROPRIADO";
    pub const NOMINAL_VALUE: &str = "VALOR_NOMINAL";
    pub const PROVISION_DATE: &str = "Data";
    pub const PREDICTED_PROVISION: &str = "PDD Prevista";
    pub const FINAL_PROVISION: &str = "PDD Final";
}

/// 计提分页 -> `AccrualRecord`
pub fn extract_accruals(table: &Table) -> Result<Vec<AccrualRecord>, ReportError> {
    extract(
        table,
        Sheet::Accrual,
        &[columns::ANALYSIS_DATE, columns::EVENT_DATE],
        DateOrder::MonthFirst,
        columns::APPROPRIATED_VALUE,
        |dates, value| AccrualRecord {
            analysis_date: dates[0],
            event_date: dates[1],
            appropriated_value: value,
        },
    )
}

/// 到期分页 -> `MaturityRecord`
pub fn extract_maturities(table: &Table) -> Result<Vec<MaturityRecord>, ReportError> {
    extract(
        table,
        Sheet::Maturity,
        &[columns::ANALYSIS_DATE, columns::EVENT_DATE],
        DateOrder::MonthFirst,
        columns::NOMINAL_VALUE,
        |dates, value| MaturityRecord {
            analysis_date: dates[0],
            event_date: dates[1],
            nominal_value: value,
        },
    )
}

/// 预计 PDD 分页 -> `ProvisionRecord`
pub fn extract_provisions(table: &Table) -> Result<Vec<ProvisionRecord>, ReportError> {
    extract(
        table,
        Sheet::ProvisionForecast,
        &[columns::PROVISION_DATE],
        DateOrder::DayFirst,
        columns::PREDICTED_PROVISION,
        |dates, value| ProvisionRecord {
            provision_date: dates[0],
            predicted_provision: value,
        },
    )
}

/// 月末 PDD 分页 -> `FinalProvisionRecord`
pub fn extract_final_provisions(table: &Table) -> Result<Vec<FinalProvisionRecord>, ReportError> {
    extract(
        table,
        Sheet::ProvisionMonthEnd,
        &[columns::ANALYSIS_DATE],
        DateOrder::DayFirst,
        columns::FINAL_PROVISION,
        |dates, value| FinalProvisionRecord {
            analysis_date: dates[0],
            final_provision: value,
        },
    )
}

/// # Summary
/// 通用提取流程。
///
/// # Logic
/// 1. 定位日期列与金额列，缺失即报 `MissingColumn`。
/// 2. 逐列确定日月顺序：若整列没有一个单元格能按 `order` 解析、却能按另一顺序解析，则改用另一顺序。
/// 3. 任一日期无法解析的行直接丢弃，不参与任何汇总，丢弃数量以 warn 记录。
/// 4. 其余行的金额按巴西格式解析，失败即报 `NumericFormat`。
///
/// # Arguments
/// * `date_columns`: 需要解析的日期列，顺序与传给 `build` 的切片一致。
/// * `order`: 斜杠日期的预期日月顺序。
/// * `value_column`: 金额列。
/// * `build`: 由解析后的日期与金额构造记录。
fn extract<T>(
    table: &Table,
    sheet: Sheet,
    date_columns: &[&'static str],
    order: DateOrder,
    value_column: &'static str,
    build: impl Fn(&[NaiveDate], Decimal) -> T,
) -> Result<Vec<T>, ReportError> {
    let date_indexes = date_columns
        .iter()
        .map(|&column| require_column(table, sheet, column))
        .collect::<Result<Vec<_>, _>>()?;
    let value_index = require_column(table, sheet, value_column)?;
    let orders: Vec<DateOrder> = date_indexes
        .iter()
        .zip(date_columns)
        .map(|(&index, &column)| resolve_order(table, sheet, column, index, order))
        .collect();

    let mut records = Vec::with_capacity(table.len());
    let mut dropped = 0usize;
    let mut dates = Vec::with_capacity(date_indexes.len());

    for (i, row) in table.rows().iter().enumerate() {
        dates.clear();
        for (&index, &column_order) in date_indexes.iter().zip(&orders) {
            match parse_date(Table::cell(row, index), column_order) {
                Some(date) => dates.push(date),
                None => break,
            }
        }
        if dates.len() != date_indexes.len() {
            dropped += 1;
            continue;
        }

        let value = parse_brl(Table::cell(row, value_index)).map_err(|source| {
            ReportError::NumericFormat {
                sheet,
                column: value_column,
                row: i + 1,
                source,
            }
        })?;
        records.push(build(&dates, value));
    }

    if dropped > 0 {
        warn!(
            "Sheet {}: dropped {} of {} rows with unparsable dates",
            sheet,
            dropped,
            table.len()
        );
    }
    Ok(records)
}

/// # Summary
/// 确定某一日期列实际使用的日月顺序。
///
/// # Returns
/// 预期顺序至少能解析一个单元格时保持不变；否则若另一顺序可以解析则返回另一顺序。
fn resolve_order(
    table: &Table,
    sheet: Sheet,
    column: &str,
    index: usize,
    order: DateOrder,
) -> DateOrder {
    let parses_with = |candidate: DateOrder| {
        table
            .rows()
            .iter()
            .any(|row| parse_date(Table::cell(row, index), candidate).is_some())
    };

    if parses_with(order) {
        return order;
    }
    let fallback = order.swapped();
    if parses_with(fallback) {
        warn!(
            "Sheet {}: no '{}' value parses as {:?}, reading the column as {:?}",
            sheet, column, order, fallback
        );
        return fallback;
    }
    order
}

fn require_column(table: &Table, sheet: Sheet, column: &'static str) -> Result<usize, ReportError> {
    table
        .column_index(column)
        .ok_or(ReportError::MissingColumn { sheet, column })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_accruals_drops_bad_dates() {
        let t = table(
            &["Dia_Analise", "DATA", "VALOR_APROPRIADO"],
            &[
                &["3/2/2025", "3/3/2025", "1.234,56"],
                &["", "3/3/2025", "10,00"],
                &["3/2/2025", "n/a", "abc"],
            ],
        );
        let records = extract_accruals(&t).unwrap();
        assert_eq!(
            records,
            vec![AccrualRecord {
                analysis_date: ymd(2025, 3, 2),
                event_date: ymd(2025, 3, 3),
                appropriated_value: dec!(1234.56),
            }]
        );
    }

    #[test]
    fn test_extract_provisions_day_first() {
        let t = table(
            &["Data", "PDD Prevista"],
            &[&["01/03/2025", "100,00"], &["01/03/2025", "50,50"]],
        );
        let records = extract_provisions(&t).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].provision_date, ymd(2025, 3, 1));
        assert_eq!(records[1].predicted_provision, dec!(50.50));
    }

    #[test]
    fn test_day_first_accrual_column_falls_back() {
        let t = table(
            &["Dia_Analise", "DATA", "VALOR_APROPRIADO"],
            &[
                &["25/03/2025", "26/03/2025", "10,00"],
                &["25/03/2025", "31/03/2025", "5,00"],
                &["", "", ""],
            ],
        );
        let records = extract_accruals(&t).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].analysis_date, ymd(2025, 3, 25));
        assert_eq!(records[1].event_date, ymd(2025, 3, 31));
    }

    #[test]
    fn test_declared_order_wins_when_any_cell_parses() {
        // 3/2/2025 可按月在前解析，整列保持月在前；13/02/2025 被丢弃
        let t = table(
            &["Dia_Analise", "DATA", "VALOR_APROPRIADO"],
            &[
                &["3/2/2025", "3/2/2025", "1,00"],
                &["13/02/2025", "3/2/2025", "2,00"],
            ],
        );
        let records = extract_accruals(&t).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].analysis_date, ymd(2025, 3, 2));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let t = table(&["Dia_Analise", "VALOR_NOMINAL"], &[]);
        assert_eq!(
            extract_maturities(&t),
            Err(ReportError::MissingColumn {
                sheet: Sheet::Maturity,
                column: columns::EVENT_DATE,
            })
        );
    }

    #[test]
    fn test_bad_amount_is_fatal_not_zero() {
        let t = table(
            &["Dia_Analise", "PDD Final"],
            &[&["02/03/2025", "10,00"], &["03/03/2025", "dez reais"]],
        );
        match extract_final_provisions(&t) {
            Err(ReportError::NumericFormat { sheet, row, source, .. }) => {
                assert_eq!(sheet, Sheet::ProvisionMonthEnd);
                assert_eq!(row, 2);
                assert_eq!(source.text, "dez reais");
            }
            other => panic!("expected NumericFormat, got {:?}", other),
        }
    }
}
