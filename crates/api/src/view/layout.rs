//! 页面外壳、样式与转义工具。

/// 浏览器端图表库
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// 页面标题
pub const PAGE_TITLE: &str = "Análise FIDC GRATIAM";

/// 未定义数值的占位符
pub const PLACEHOLDER: &str = "—";

const STYLE: &str = r#"
body {
    background-color: #6495ED;
    font-family: "Source Sans Pro", Arial, sans-serif;
    margin: 0;
    color: #1f1f1f;
}
main { max-width: 1400px; margin: 0 auto; padding: 24px; }
header.topbar { display: flex; align-items: center; gap: 16px; margin-bottom: 16px; }
header.topbar h1 { flex: 1; font-size: 28px; margin: 0; color: #ffffff; }
header.topbar img.logo { height: 64px; }
header.topbar .user { color: #ffffff; }
h2 { color: #ffffff; margin: 24px 0 8px; }
.grid { display: grid; grid-template-columns: 2fr 1fr; gap: 24px; align-items: start; }
.panel { background-color: #f0f4ff; border-radius: 12px; padding: 12px; margin-bottom: 16px; }
.chart { width: 100%; height: 360px; }
.metric-container {
    background-color: white;
    padding: 20px;
    border-radius: 20px;
    box-shadow: 0 0 10px rgba(0,0,0,0.2);
    text-align: center;
    margin-bottom: 20px;
}
.metric-label { font-size: 18px; color: #333333; }
.metric-value { font-size: 28px; font-weight: bold; color: #000000; }
.metric-detail { font-size: 14px; color: #555555; margin-top: 6px; }
.warning { background-color: #fff3cd; color: #664d03; border-radius: 8px; padding: 12px; margin-bottom: 16px; }
.info { background-color: #e7f1ff; color: #084298; border-radius: 8px; padding: 12px; margin-bottom: 16px; }
.error { background-color: #f8d7da; color: #842029; border-radius: 8px; padding: 16px; }
table.pdd { width: 100%; border-collapse: collapse; background-color: white; }
table.pdd th, table.pdd td { padding: 6px 10px; border-bottom: 1px solid #dddddd; text-align: right; }
table.pdd th:first-child, table.pdd td:first-child { text-align: left; }
table.pdd tr.forecast td { font-style: italic; }
td.var-high-positive { background-color: #ffcccc; }
td.var-high-negative { background-color: #ccffcc; }
form.date-selector { margin-bottom: 16px; color: #ffffff; }
.login-box { max-width: 360px; margin: 80px auto; background: white; border-radius: 20px; padding: 32px; box-shadow: 0 0 10px rgba(0,0,0,0.2); }
.login-box label { display: block; margin-top: 12px; }
.login-box input { width: 100%; padding: 8px; box-sizing: border-box; }
.login-box button { margin-top: 20px; width: 100%; padding: 10px; }
"#;

/// # Summary
/// 转义 HTML 特殊字符。
///
/// # Invariants
/// - 所有插入页面的文本都必须经过本函数。
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// # Summary
/// 将 JSON 文本嵌入 `<script>` 块。
///
/// # Logic
/// 转义 `</`，避免数据中的 `</script>` 提前结束脚本。
pub fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Logo 图片标签；未配置 Logo 时为空
pub fn logo_img(show_logo: bool) -> &'static str {
    if show_logo {
        r#"<img class="logo" src="/static/logo" alt="GRATIAM">"#
    } else {
        ""
    }
}

/// # Summary
/// 完整页面外壳。
///
/// # Arguments
/// * `title`: 页面标题 (未转义)。
/// * `body`: 已渲染好的页面主体。
/// * `with_charts`: 是否加载 Plotly。
pub fn page(title: &str, body: &str, with_charts: bool) -> String {
    let script = if with_charts {
        format!(r#"<script src="{}" charset="utf-8"></script>"#, PLOTLY_CDN)
    } else {
        String::new()
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
{script}
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        script = script,
        body = body,
    )
}

/// 致命错误的阻断页面
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        r#"<div class="error"><h1>{}</h1><p>{}</p><p><a href="/">Tentar novamente</a></p></div>"#,
        escape(title),
        escape(message)
    );
    page(PAGE_TITLE, &body, false)
}
