use chrono::{Datelike, NaiveDate};

/// # Summary
/// 斜杠日期中日与月的先后顺序。
///
/// # Invariants
/// - 仅影响 `a/b/yyyy` 形式；ISO 日期 (`yyyy-mm-dd`) 与顺序无关。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    // 3/1/2025 = 2025-03-01
    MonthFirst,
    // 01/03/2025 = 2025-03-01
    DayFirst,
}

impl DateOrder {
    /// 另一种日月顺序
    pub fn swapped(self) -> Self {
        match self {
            DateOrder::MonthFirst => DateOrder::DayFirst,
            DateOrder::DayFirst => DateOrder::MonthFirst,
        }
    }
}

/// # Summary
/// 宽松地解析单元格中的日期文本。
///
/// # Logic
/// 1. 去除首尾空白，丢弃时间部分 (空格或 `T` 之后的内容)。
/// 2. 依次尝试 `yyyy-mm-dd`、`yyyy/mm/dd`。
/// 3. 最后按 `order` 尝试斜杠日期。
///
/// # Returns
/// 无法识别时返回 `None`，由调用方丢弃该行。
pub fn parse_date(text: &str, order: DateOrder) -> Option<NaiveDate> {
    let trimmed = text.trim();
    let date_part = trimmed
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed);

    if date_part.is_empty() {
        return None;
    }

    let slash_format = match order {
        DateOrder::MonthFirst => "%m/%d/%Y",
        DateOrder::DayFirst => "%d/%m/%Y",
    };

    ["%Y-%m-%d", "%Y/%m/%d", slash_format]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// 给定日期所在月份的最后一天。
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next.and_then(|d| d.pred_opt()).unwrap_or(date)
}

/// `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `dd/mm`
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_order_swapped() {
        assert_eq!(DateOrder::MonthFirst.swapped(), DateOrder::DayFirst);
        assert_eq!(DateOrder::DayFirst.swapped(), DateOrder::MonthFirst);
    }

    #[test]
    fn test_parse_iso_and_datetime() {
        assert_eq!(parse_date("2025-03-01", DateOrder::DayFirst), Some(ymd(2025, 3, 1)));
        assert_eq!(
            parse_date(" 2025-03-01 00:00:00 ", DateOrder::MonthFirst),
            Some(ymd(2025, 3, 1))
        );
        assert_eq!(parse_date("2025-03-01T12:00:00", DateOrder::MonthFirst), Some(ymd(2025, 3, 1)));
    }

    #[test]
    fn test_parse_slash_respects_order() {
        assert_eq!(parse_date("3/1/2025", DateOrder::MonthFirst), Some(ymd(2025, 3, 1)));
        assert_eq!(parse_date("01/03/2025", DateOrder::DayFirst), Some(ymd(2025, 3, 1)));
        assert_eq!(parse_date("31/01/2025", DateOrder::MonthFirst), None);
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_date("", DateOrder::DayFirst), None);
        assert_eq!(parse_date("Total", DateOrder::DayFirst), None);
        assert_eq!(parse_date("2025-02-30", DateOrder::DayFirst), None);
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(ymd(2025, 2, 10)), ymd(2025, 2, 28));
        assert_eq!(last_day_of_month(ymd(2024, 2, 1)), ymd(2024, 2, 29));
        assert_eq!(last_day_of_month(ymd(2025, 12, 31)), ymd(2025, 12, 31));
        assert_eq!(last_day_of_month(ymd(2025, 4, 30)), ymd(2025, 4, 30));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_date(ymd(2025, 3, 2)), "02/03/2025");
        assert_eq!(format_day_month(ymd(2025, 3, 2)), "02/03");
    }
}
