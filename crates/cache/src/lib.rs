//! # `gratiam-cache` - 表格缓存实现

pub mod mem;
