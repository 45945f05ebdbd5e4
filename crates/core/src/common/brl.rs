//! # 巴西本地化数值编解码
//!
//! 源表格中的金额以巴西格式导出 (`1.234,56`)：`.` 为千分位、`,` 为小数点，
//! 且可能夹杂不换行空格。本模块负责解析与反向格式化。

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

// 不换行空格 (U+00A0)
const NBSP: char = '\u{00A0}';

/// # Summary
/// 金额文本无法解析为数值时返回的错误。
///
/// # Invariants
/// - `text` 保存原始输入，便于定位脏数据；绝不以 0 兜底。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid BRL amount: {text:?}")]
pub struct NumericFormatError {
    pub text: String,
}

/// # Summary
/// 将巴西格式的十进制文本解析为 `Decimal`。
///
/// # Logic
/// 1. 去除不换行空格及首尾空白。
/// 2. 删除全部 `.` (千分位)。
/// 3. 将全部 `,` 替换为 `.` (小数点)。
/// 4. 按十进制数解析。
///
/// # Arguments
/// * `text`: 原始单元格文本。
///
/// # Returns
/// 成功返回数值，否则返回 `NumericFormatError`。
pub fn parse_brl(text: &str) -> Result<Decimal, NumericFormatError> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != NBSP && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(NumericFormatError {
            text: text.to_string(),
        });
    }

    Decimal::from_str(cleaned).map_err(|_| NumericFormatError {
        text: text.to_string(),
    })
}

/// # Summary
/// 将金额格式化为 `R$ 1.234,56`。
///
/// # Logic
/// 1. 四舍五入 (远离零) 到两位小数。
/// 2. 整数部分每三位插入 `.`，小数部分以 `,` 分隔。
/// 3. 负数形如 `R$ -1.234,56`。
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {}", format_grouped(value))
}

/// 将百分比格式化为 `5,00%`。
pub fn format_pct(value: Decimal) -> String {
    format!("{}%", format_grouped(value))
}

fn format_grouped(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = rounded.abs().to_string();
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{},{}", sign, grouped, frac_part)
}
