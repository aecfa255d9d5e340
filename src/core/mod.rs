//! 核心层：错误边界、中间件、响应封装

pub mod error;
pub mod middleware;
pub mod response;
