//! 核心响应处理模块

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::error::CoreError;

/// 找不到路由时的固定响应体
pub const NOT_FOUND_BODY: &str = "The page was not found";

/// 把 askama 模板渲染成 HTML 响应，渲染失败走 500
pub struct HtmlTemplate<T>(pub T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => CoreError::from(err).into_response(),
        }
    }
}

/// 写操作完成后回到列表首页
pub fn redirect_home() -> Redirect {
    Redirect::to("/")
}

/// 兜底 404
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}
