//! # `gratiam-core` - 核心领域层
//!
//! 汇集 FIDC GRATIAM 报表面板的实体、端口 (Trait) 与错误定义。
//! 本 crate 不做任何 I/O，具体实现由 `feed` / `cache` / `source` 等 crate 注入。

pub mod auth;
pub mod cache;
pub mod common;
pub mod config;
pub mod report;
pub mod source;
