//! # 服务端 HTML 渲染
//!
//! 页面以字符串拼接生成，图表数据以 JSON 嵌入页面，由浏览器端 Plotly 绘制。

pub mod dashboard;
pub mod layout;
pub mod login;
