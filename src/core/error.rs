//! 核心错误处理模块
//!
//! 每个请求的错误边界：处理器返回的错误在这里统一转换成状态码和纯文本响应，
//! 服务端错误同时记录日志。

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// 核心错误类型
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("data access error: {0}")]
    DataAccess(String),

    #[error("internal error: {0}")]
    InternalServerError(String),
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            CoreError::DataAccess(_) | CoreError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            CoreError::BadRequest(msg) => {
                warn!(error = %msg, "Rejected request");
                msg
            }
            CoreError::PayloadTooLarge => {
                warn!("Rejected upload above the size limit");
                "Payload too large".to_string()
            }
            CoreError::DataAccess(msg) => {
                error!(error = %msg, "Data access failed");
                "Internal server error".to_string()
            }
            CoreError::InternalServerError(msg) => {
                error!(error = %msg, "Request failed");
                "Internal server error".to_string()
            }
        };

        (status, body).into_response()
    }
}

impl From<MultipartError> for CoreError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            CoreError::PayloadTooLarge
        } else {
            CoreError::BadRequest(err.body_text())
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::InternalServerError(err.to_string())
    }
}

impl From<askama::Error> for CoreError {
    fn from(err: askama::Error) -> Self {
        CoreError::InternalServerError(format!("template rendering failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(_, errors)| {
                errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| "Validation error".to_string())
                })
            })
            .collect();

        CoreError::BadRequest(messages.join(", "))
    }
}
