//! 登录页。

use crate::view::layout::{PAGE_TITLE, escape, logo_img, page};

/// # Summary
/// 渲染登录表单。
///
/// # Arguments
/// * `error`: 上一次提交的校验错误信息。
/// * `show_logo`: 是否显示 Logo。
pub fn render_login(error: Option<&str>, show_logo: bool) -> String {
    let error_html = error
        .map(|msg| format!(r#"<div class="error">{}</div>"#, escape(msg)))
        .unwrap_or_default();

    let body = format!(
        r#"<div class="login-box">
{logo}
<h1>Acesso restrito</h1>
{error}
<form method="post" action="/login">
<label for="username">Usuário</label>
<input id="username" name="username" type="text" autocomplete="username" required>
<label for="password">Senha</label>
<input id="password" name="password" type="password" autocomplete="current-password" required>
<button type="submit">Entrar</button>
</form>
</div>"#,
        logo = logo_img(show_logo),
        error = error_html,
    );
    page(PAGE_TITLE, &body, false)
}
