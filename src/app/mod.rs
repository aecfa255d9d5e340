//! 应用层

pub mod users;

use axum::{handler::HandlerWithoutStateExt, middleware, Router};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::core::{middleware::request_logging_middleware, response::not_found};
use users::handler::AppState;

/// 组装完整路由：业务路由、`/static` 静态资源、兜底 404，以及日志和 panic 边界
pub fn build_router(state: AppState, public_dir: &Path, upload_limit: usize) -> Router {
    // 文件不存在或方法不是 GET/HEAD 时同样回到兜底 404
    let static_files = ServeDir::new(public_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(not_found.into_service());

    users::routes(upload_limit)
        .nest_service("/static", static_files)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
