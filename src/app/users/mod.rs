//! 用户管理：列表、详情、上传新建、更新、删除和搜索

pub mod handler;
pub mod memory;
pub mod model;
#[cfg(feature = "database")]
pub mod postgres;
pub mod repository;
pub mod service;
pub mod view;

use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    routing::{get, post},
    Router,
};

use crate::core::response::not_found;
use handler::AppState;

/// 路径匹配但方法不匹配时也走 404
pub fn routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_first_page)
                .post(handler::create_user.layer(DefaultBodyLimit::max(upload_limit)))
                .fallback(not_found),
        )
        .route("/:page", get(handler::list_page).fallback(not_found))
        .route("/user/:id", get(handler::show_user).fallback(not_found))
        .route(
            "/update/:id",
            get(handler::edit_user)
                .post(handler::update_user)
                .fallback(not_found),
        )
        .route("/remove/:id", post(handler::remove_user).fallback(not_found))
        .route("/remove", post(handler::remove_all).fallback(not_found))
        .route("/search", post(handler::search).fallback(not_found))
}
