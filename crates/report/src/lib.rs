//! # `gratiam-report` - 报表构建层
//!
//! 将原始表格提取为强类型记录，并完成按分析日期筛选、汇总、
//! 环比与"最关键日"等派生计算。所有运算均为纯函数。

pub mod builder;
pub mod dashboard;
pub mod extract;
