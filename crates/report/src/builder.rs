//! # 报表派生计算
//!
//! 每个操作都是给定输入下的纯函数：不做 I/O、不修改入参。
//! 百分比运算在除数为 0 时返回 `None`，金额求和溢出时返回 `None` 或 `ReportError::Overflow`，绝不 panic。

use chrono::NaiveDate;
use gratiam_core::common::Sheet;
use gratiam_core::common::date::last_day_of_month;
use gratiam_core::report::entity::{
    AccrualRecord, AnalysisDated, CriticalDay, DatePoint, DayOverDay, FinalProvisionRecord, Phase,
    ProvisionPoint, ProvisionRecord, ProvisionSeries, TaggedPoint, VariationBand,
};
use gratiam_core::report::error::ReportError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, BTreeSet};

/// 超过该幅度 (百分比) 的变动在表格中高亮
pub const HIGH_VARIATION_PCT: Decimal = dec!(3);

/// 按分析日期精确筛选 (日期相等，而非区间)。
pub fn filter_by_analysis_date<T: AnalysisDated + Clone>(records: &[T], date: NaiveDate) -> Vec<T> {
    records
        .iter()
        .filter(|r| r.analysis_date() == date)
        .cloned()
        .collect()
}

/// 逐项 `checked_add`，任一步溢出返回 `None`
fn checked_total(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

/// # Summary
/// 对记录中的某个金额字段求和。
///
/// # Returns
/// 空集合返回 `Some(0)`；合计超出 `Decimal` 范围时返回 `None`。
pub fn sum_column<T>(records: &[T], value: impl Fn(&T) -> Decimal) -> Option<Decimal> {
    checked_total(records.iter().map(value))
}

/// # Summary
/// 按日期汇总金额，生成升序的图表序列。
///
/// # Returns
/// 任一日期的合计溢出时返回 `None`。
pub fn sum_by_date<T>(
    records: &[T],
    date: impl Fn(&T) -> NaiveDate,
    value: impl Fn(&T) -> Decimal,
) -> Option<Vec<DatePoint>> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in records {
        let total = totals.entry(date(record)).or_default();
        *total = total.checked_add(value(record))?;
    }
    Some(
        totals
            .into_iter()
            .map(|(date, value)| DatePoint { date, value })
            .collect(),
    )
}

/// 计提记录中出现过的全部分析日期 (去重、升序)
pub fn available_analysis_dates(records: &[AccrualRecord]) -> Vec<NaiveDate> {
    records
        .iter()
        .map(|r| r.analysis_date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// # Summary
/// 计算 `(current - previous) / previous * 100`。
///
/// # Returns
/// `previous` 为 0 或运算溢出时返回 `None`。
pub fn pct_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    current
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// # Summary
/// 构建 PDD 序列。
///
/// # Logic
/// 1. 按日期分组并对预计 PDD 求和。
/// 2. 按日期升序排列。
/// 3. 逐点计算相对前一点的百分比变动；首点以及前值为 0 时为 `None`。
///
/// # Returns
/// 某日合计溢出时返回 `ReportError::Overflow`。
pub fn build_provision_series(records: &[ProvisionRecord]) -> Result<ProvisionSeries, ReportError> {
    let totals = sum_by_date(records, |r| r.provision_date, |r| r.predicted_provision).ok_or(
        ReportError::Overflow {
            sheet: Sheet::ProvisionForecast,
        },
    )?;

    let mut previous: Option<Decimal> = None;
    let points = totals
        .into_iter()
        .map(|p| {
            let change = previous.and_then(|prev| pct_change(p.value, prev));
            previous = Some(p.value);
            ProvisionPoint {
                date: p.date,
                total_provision: p.value,
                pct_change: change,
            }
        })
        .collect();

    Ok(ProvisionSeries { points })
}

/// # Summary
/// 找出分析日期之后变动最大的一天。
///
/// # Logic
/// 1. 只考虑日期严格晚于 `analysis_date` 且变动已定义的点。
/// 2. 取变动最大者 (正向最大值，不是绝对值)；并列时取最早的一天。
///
/// # Returns
/// 未来窗口为空或变动全部未定义时返回 `None`。
pub fn most_critical_future_day(
    series: &ProvisionSeries,
    analysis_date: NaiveDate,
) -> Option<CriticalDay> {
    series
        .iter()
        .filter(|p| p.date > analysis_date)
        .filter_map(|p| p.pct_change.map(|pct| (p.date, pct)))
        .fold(None, |best: Option<CriticalDay>, (date, pct)| match best {
            Some(b) if b.pct_change >= pct => Some(b),
            _ => Some(CriticalDay {
                date,
                pct_change: pct,
            }),
        })
}

/// 分析日期所在月最后一天的预计 PDD 合计，无记录时为 0。
pub fn month_end_total(
    records: &[ProvisionRecord],
    analysis_date: NaiveDate,
) -> Result<Decimal, ReportError> {
    let month_end = last_day_of_month(analysis_date);
    checked_total(
        records
            .iter()
            .filter(|r| r.provision_date == month_end)
            .map(|r| r.predicted_provision),
    )
    .ok_or(ReportError::Overflow {
        sheet: Sheet::ProvisionForecast,
    })
}

/// # Summary
/// 月末 PDD 快照的当日对前一自然日对比。
///
/// # Logic
/// 1. 分别汇总分析日期与前一自然日的记录。
/// 2. 任一天缺失即返回 `None`，不做任何除法。
/// 3. 两者都存在时计算百分比变动。
///
/// # Returns
/// 缺少任一天时为 `Ok(None)`；某日合计溢出时为 `ReportError::Overflow`。
pub fn day_over_day_final_provision(
    records: &[FinalProvisionRecord],
    analysis_date: NaiveDate,
) -> Result<Option<DayOverDay>, ReportError> {
    let total_on = |date: NaiveDate| -> Result<Option<Decimal>, ReportError> {
        let matching = filter_by_analysis_date(records, date);
        if matching.is_empty() {
            return Ok(None);
        }
        sum_column(&matching, |r| r.final_provision)
            .map(Some)
            .ok_or(ReportError::Overflow {
                sheet: Sheet::ProvisionMonthEnd,
            })
    };

    let Some(today) = total_on(analysis_date)? else {
        return Ok(None);
    };
    let Some(yesterday) = analysis_date.pred_opt() else {
        return Ok(None);
    };
    let Some(yesterday) = total_on(yesterday)? else {
        return Ok(None);
    };

    Ok(Some(DayOverDay {
        today,
        yesterday,
        pct_change: pct_change(today, yesterday),
    }))
}

/// 分析日期及之前为"已实现"，之后为"预测"。
pub fn classify_realized_vs_forecast(
    series: &ProvisionSeries,
    analysis_date: NaiveDate,
) -> Vec<TaggedPoint> {
    series
        .iter()
        .map(|p| TaggedPoint {
            point: p.clone(),
            phase: if p.date <= analysis_date {
                Phase::Realized
            } else {
                Phase::Forecast
            },
        })
        .collect()
}

/// 按 ±3% 阈值对变动分档，未定义的变动视为普通。
pub fn classify_variation(pct_change: Option<Decimal>) -> VariationBand {
    match pct_change {
        Some(pct) if pct > HIGH_VARIATION_PCT => VariationBand::HighPositive,
        Some(pct) if pct < -HIGH_VARIATION_PCT => VariationBand::HighNegative,
        _ => VariationBand::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn provision(date: NaiveDate, value: Decimal) -> ProvisionRecord {
        ProvisionRecord {
            provision_date: date,
            predicted_provision: value,
        }
    }

    fn point(date: NaiveDate, pct: Option<Decimal>) -> ProvisionPoint {
        ProvisionPoint {
            date,
            total_provision: Decimal::ZERO,
            pct_change: pct,
        }
    }

    fn final_provision(date: NaiveDate, value: Decimal) -> FinalProvisionRecord {
        FinalProvisionRecord {
            analysis_date: date,
            final_provision: value,
        }
    }

    #[test]
    fn test_filter_and_sum() {
        let records = vec![
            AccrualRecord {
                analysis_date: ymd(2025, 3, 1),
                event_date: ymd(2025, 3, 5),
                appropriated_value: dec!(10.5),
            },
            AccrualRecord {
                analysis_date: ymd(2025, 3, 2),
                event_date: ymd(2025, 3, 5),
                appropriated_value: dec!(20.25),
            },
            AccrualRecord {
                analysis_date: ymd(2025, 3, 2),
                event_date: ymd(2025, 3, 6),
                appropriated_value: dec!(1.25),
            },
        ];
        let filtered = filter_by_analysis_date(&records, ymd(2025, 3, 2));
        assert_eq!(filtered.len(), 2);
        assert_eq!(sum_column(&filtered, |r| r.appropriated_value), Some(dec!(21.50)));

        let empty = filter_by_analysis_date(&records, ymd(2025, 3, 3));
        assert_eq!(sum_column(&empty, |r| r.appropriated_value), Some(Decimal::ZERO));

        assert_eq!(
            available_analysis_dates(&records),
            vec![ymd(2025, 3, 1), ymd(2025, 3, 2)]
        );
    }

    #[test]
    fn test_sum_by_date_groups_and_sorts() {
        let records = vec![
            provision(ymd(2025, 3, 3), dec!(1)),
            provision(ymd(2025, 3, 1), dec!(2)),
            provision(ymd(2025, 3, 3), dec!(4)),
        ];
        let points =
            sum_by_date(&records, |r| r.provision_date, |r| r.predicted_provision).unwrap();
        assert_eq!(
            points,
            vec![
                DatePoint {
                    date: ymd(2025, 3, 1),
                    value: dec!(2)
                },
                DatePoint {
                    date: ymd(2025, 3, 3),
                    value: dec!(5)
                },
            ]
        );
    }

    #[test]
    fn test_provision_series_pct_change() {
        let series = build_provision_series(&[
            provision(ymd(2025, 1, 2), dec!(150)),
            provision(ymd(2025, 1, 1), dec!(60)),
            provision(ymd(2025, 1, 1), dec!(40)),
        ])
        .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].date, ymd(2025, 1, 1));
        assert_eq!(series.points[0].total_provision, dec!(100));
        assert_eq!(series.points[0].pct_change, None);
        assert_eq!(series.points[1].pct_change, Some(dec!(50)));
    }

    #[test]
    fn test_provision_series_zero_previous_is_undefined() {
        let series = build_provision_series(&[
            provision(ymd(2025, 1, 1), Decimal::ZERO),
            provision(ymd(2025, 1, 2), dec!(10)),
            provision(ymd(2025, 1, 3), dec!(5)),
        ])
        .unwrap();
        assert_eq!(series.points[1].pct_change, None);
        assert_eq!(series.points[2].pct_change, Some(dec!(-50)));
        assert!(series.points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_most_critical_future_day() {
        let series = ProvisionSeries {
            points: vec![
                point(ymd(2025, 1, 5), Some(dec!(9))),
                point(ymd(2025, 1, 10), Some(dec!(8))),
                point(ymd(2025, 1, 15), Some(dec!(2))),
                point(ymd(2025, 1, 20), Some(dec!(5))),
                point(ymd(2025, 1, 25), None),
            ],
        };
        assert_eq!(
            most_critical_future_day(&series, ymd(2025, 1, 10)),
            Some(CriticalDay {
                date: ymd(2025, 1, 20),
                pct_change: dec!(5),
            })
        );
    }

    #[test]
    fn test_most_critical_future_day_empty_window() {
        let series = ProvisionSeries {
            points: vec![
                point(ymd(2025, 1, 5), Some(dec!(9))),
                point(ymd(2025, 1, 15), None),
            ],
        };
        assert_eq!(most_critical_future_day(&series, ymd(2025, 1, 20)), None);
        assert_eq!(most_critical_future_day(&series, ymd(2025, 1, 10)), None);
        assert_eq!(
            most_critical_future_day(&ProvisionSeries::default(), ymd(2025, 1, 10)),
            None
        );
    }

    #[test]
    fn test_most_critical_prefers_positive_maximum_and_earliest_tie() {
        let series = ProvisionSeries {
            points: vec![
                point(ymd(2025, 1, 11), Some(dec!(-40))),
                point(ymd(2025, 1, 12), Some(dec!(1.5))),
                point(ymd(2025, 1, 13), Some(dec!(1.5))),
            ],
        };
        assert_eq!(
            most_critical_future_day(&series, ymd(2025, 1, 10)),
            Some(CriticalDay {
                date: ymd(2025, 1, 12),
                pct_change: dec!(1.5),
            })
        );
    }

    #[test]
    fn test_month_end_total() {
        let records = vec![
            provision(ymd(2025, 2, 28), dec!(100)),
            provision(ymd(2025, 2, 28), dec!(23.45)),
            provision(ymd(2025, 2, 27), dec!(999)),
        ];
        assert_eq!(month_end_total(&records, ymd(2025, 2, 10)), Ok(dec!(123.45)));
        assert_eq!(month_end_total(&records, ymd(2025, 3, 10)), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_day_over_day() {
        let records = vec![
            final_provision(ymd(2025, 3, 1), dec!(200)),
            final_provision(ymd(2025, 3, 2), dec!(210)),
        ];
        assert_eq!(
            day_over_day_final_provision(&records, ymd(2025, 3, 2)),
            Ok(Some(DayOverDay {
                today: dec!(210),
                yesterday: dec!(200),
                pct_change: Some(dec!(5)),
            }))
        );
    }

    #[test]
    fn test_day_over_day_missing_yesterday() {
        let records = vec![
            final_provision(ymd(2025, 3, 2), dec!(210)),
            final_provision(ymd(2025, 3, 4), dec!(300)),
        ];
        assert_eq!(day_over_day_final_provision(&records, ymd(2025, 3, 2)), Ok(None));
        assert_eq!(day_over_day_final_provision(&records, ymd(2025, 3, 4)), Ok(None));
        assert_eq!(day_over_day_final_provision(&records, ymd(2025, 3, 3)), Ok(None));
    }

    #[test]
    fn test_day_over_day_zero_yesterday() {
        let records = vec![
            final_provision(ymd(2025, 3, 1), Decimal::ZERO),
            final_provision(ymd(2025, 3, 2), dec!(10)),
        ];
        let dod = day_over_day_final_provision(&records, ymd(2025, 3, 2))
            .unwrap()
            .unwrap();
        assert_eq!(dod.yesterday, Decimal::ZERO);
        assert_eq!(dod.pct_change, None);
    }

    #[test]
    fn test_sums_near_decimal_max_report_overflow() {
        // 5 × 10^28，两笔相加超出 Decimal 上限
        let huge = gratiam_core::common::brl::parse_brl("50.000.000.000.000.000.000.000.000.000")
            .unwrap();
        let day = ymd(2025, 3, 31);

        assert_eq!(
            build_provision_series(&[provision(day, huge), provision(day, huge)]),
            Err(ReportError::Overflow {
                sheet: Sheet::ProvisionForecast,
            })
        );
        assert_eq!(
            month_end_total(&[provision(day, huge), provision(day, huge)], day),
            Err(ReportError::Overflow {
                sheet: Sheet::ProvisionForecast,
            })
        );
        assert_eq!(
            day_over_day_final_provision(
                &[final_provision(day, huge), final_provision(day, huge)],
                day
            ),
            Err(ReportError::Overflow {
                sheet: Sheet::ProvisionMonthEnd,
            })
        );

        let records = [provision(day, huge), provision(day, huge)];
        assert_eq!(sum_column(&records, |r| r.predicted_provision), None);
        assert_eq!(
            sum_by_date(&records, |r| r.provision_date, |r| r.predicted_provision),
            None
        );
        // 单笔仍然可以正常汇总
        assert_eq!(sum_column(&records[..1], |r| r.predicted_provision), Some(huge));
    }

    #[test]
    fn test_classify_realized_vs_forecast() {
        let series = ProvisionSeries {
            points: vec![
                point(ymd(2025, 3, 1), None),
                point(ymd(2025, 3, 2), None),
                point(ymd(2025, 3, 3), None),
            ],
        };
        let phases: Vec<Phase> = classify_realized_vs_forecast(&series, ymd(2025, 3, 2))
            .into_iter()
            .map(|t| t.phase)
            .collect();
        assert_eq!(phases, vec![Phase::Realized, Phase::Realized, Phase::Forecast]);
    }

    #[test]
    fn test_classify_variation_thresholds() {
        assert_eq!(classify_variation(None), VariationBand::Normal);
        assert_eq!(classify_variation(Some(dec!(3))), VariationBand::Normal);
        assert_eq!(classify_variation(Some(dec!(3.01))), VariationBand::HighPositive);
        assert_eq!(classify_variation(Some(dec!(-3))), VariationBand::Normal);
        assert_eq!(classify_variation(Some(dec!(-3.5))), VariationBand::HighNegative);
    }
}
