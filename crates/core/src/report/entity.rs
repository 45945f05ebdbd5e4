use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 带分析日期的记录，用于按分析日期筛选。
pub trait AnalysisDated {
    fn analysis_date(&self) -> NaiveDate;
}

/// # Summary
/// 每日计提记录，来源于 `Apropriacao_Diaria_Estoque` 分页。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualRecord {
    // 分析日期 (快照日)
    pub analysis_date: NaiveDate,
    // 计提发生日期
    pub event_date: NaiveDate,
    // 计提金额
    pub appropriated_value: Decimal,
}

/// # Summary
/// 每日到期记录，来源于 `Vencimento_Diario_Estoque` 分页。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityRecord {
    pub analysis_date: NaiveDate,
    // 到期日
    pub event_date: NaiveDate,
    // 名义金额
    pub nominal_value: Decimal,
}

/// # Summary
/// 预计 PDD 记录，来源于 `Pdd_Total_Previsto` 分页。
///
/// # Invariants
/// - 同一日期可以出现多行，下游按日期汇总。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRecord {
    pub provision_date: NaiveDate,
    pub predicted_provision: Decimal,
}

/// # Summary
/// 月末 PDD 预测快照，来源于 `Pdd_Final_Mes` 分页，每个分析日一行。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalProvisionRecord {
    pub analysis_date: NaiveDate,
    pub final_provision: Decimal,
}

impl AnalysisDated for AccrualRecord {
    fn analysis_date(&self) -> NaiveDate {
        self.analysis_date
    }
}

impl AnalysisDated for MaturityRecord {
    fn analysis_date(&self) -> NaiveDate {
        self.analysis_date
    }
}

impl AnalysisDated for FinalProvisionRecord {
    fn analysis_date(&self) -> NaiveDate {
        self.analysis_date
    }
}

/// 图表上的一个点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// # Summary
/// PDD 序列中的一个点。
///
/// # Invariants
/// - `pct_change` 在首个点或前值为 0 时为 `None`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionPoint {
    pub date: NaiveDate,
    pub total_provision: Decimal,
    pub pct_change: Option<Decimal>,
}

/// # Summary
/// 按日期汇总后的 PDD 序列。
///
/// # Invariants
/// - `points` 按日期严格升序，日期不重复。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProvisionSeries {
    pub points: Vec<ProvisionPoint>,
}

impl ProvisionSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProvisionPoint> {
        self.points.iter()
    }
}

/// 未来窗口内变动最大的一天
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalDay {
    pub date: NaiveDate,
    pub pct_change: Decimal,
}

/// # Summary
/// 月末 PDD 快照的环比 (当日对前一自然日)。
///
/// # Invariants
/// - 前一日金额为 0 时 `pct_change` 为 `None`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOverDay {
    pub today: Decimal,
    pub yesterday: Decimal,
    pub pct_change: Option<Decimal>,
}

/// 月末 PDD 预测合计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEndForecast {
    // 分析日期所在月的最后一天
    pub month_end: NaiveDate,
    pub total: Decimal,
}

/// 序列点相对分析日期的阶段 (纯展示用途)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Realized,
    Forecast,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Realized => write!(f, "Realizado"),
            Phase::Forecast => write!(f, "Previsto"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedPoint {
    pub point: ProvisionPoint,
    pub phase: Phase,
}

/// # Summary
/// 变动幅度分档，供表格条件高亮使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariationBand {
    Normal,
    // 高于 +3%
    HighPositive,
    // 低于 -3%
    HighNegative,
}
