//! # `gratiam-feed` - 远程表格数据源驱动

pub mod sheets;
