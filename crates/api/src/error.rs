//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 HTML 错误页。

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use gratiam_core::report::error::ReportError;
use gratiam_core::source::error::DataSourceError;
use thiserror::Error;

use crate::view::layout::error_page;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 未通过门禁 (跳转登录页)
    #[error("Authentication required")]
    Unauthenticated,

    /// 请求参数错误 (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 远端表格不可用 (502)
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// 表格内容无法构建报表 (500)
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            ApiError::Unauthenticated => return Redirect::to("/login").into_response(),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Requisição inválida",
                msg.clone(),
            ),
            ApiError::DataSource(err) => {
                // 网络细节只记录日志，不向页面透传
                tracing::error!("Failed to load spreadsheet data: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "Falha ao carregar os dados",
                    "Não foi possível obter os dados da planilha. Tente novamente mais tarde."
                        .to_string(),
                )
            }
            ApiError::Report(err) => {
                tracing::error!("Failed to build dashboard: {}", err);
                let message = match err {
                    ReportError::NoAnalysisDates => {
                        "Nenhuma data de análise disponível na planilha.".to_string()
                    }
                    other => format!("Dados inválidos na planilha: {}", other),
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro nos dados",
                    message,
                )
            }
        };

        (status, Html(error_page(title, &message))).into_response()
    }
}
