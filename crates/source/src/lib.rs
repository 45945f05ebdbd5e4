//! # `gratiam-source` - 远程表格加载器
//!
//! 在 `SheetProvider` 之上提供按分页名称记忆的 `load` 操作。

pub mod loader;
