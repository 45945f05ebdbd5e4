pub mod brl;
pub mod date;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 面板所消费的远程工作表，对应已发布电子表格中的各个分页。
///
/// # Invariants
/// - `name()` 返回值即远端导出接口中的 `sheet` 参数，必须与表格分页名完全一致。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sheet {
    // 每日计提 (Apropriação Diária)
    Accrual,
    // 每日到期 (Vencimento Diário)
    Maturity,
    // 预计 PDD 总额
    ProvisionForecast,
    // 月末 PDD 快照
    ProvisionMonthEnd,
}

impl Sheet {
    /// 报表一次完整渲染所需的全部工作表。
    pub const ALL: [Sheet; 4] = [
        Sheet::Accrual,
        Sheet::Maturity,
        Sheet::ProvisionForecast,
        Sheet::ProvisionMonthEnd,
    ];

    /// 远端分页名称
    pub fn name(&self) -> &'static str {
        match self {
            Sheet::Accrual => "Apropriacao_Diaria_Estoque",
            Sheet::Maturity => "Vencimento_Diario_Estoque",
            Sheet::ProvisionForecast => "Pdd_Total_Previsto",
            Sheet::ProvisionMonthEnd => "Pdd_Final_Mes",
        }
    }
}

impl FromStr for Sheet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sheet::ALL
            .into_iter()
            .find(|sheet| sheet.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown sheet: {}", s))
    }
}

impl std::fmt::Display for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_names_round_trip() {
        for sheet in Sheet::ALL {
            assert_eq!(sheet.name().parse::<Sheet>(), Ok(sheet));
        }
        assert_eq!("pdd_final_mes".parse::<Sheet>(), Ok(Sheet::ProvisionMonthEnd));
        assert!("Carteira".parse::<Sheet>().is_err());
    }
}
