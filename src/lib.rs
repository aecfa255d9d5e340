//! # user-gallery
//!
//! 服务端渲染的用户管理应用：分页列表、详情、带图片上传的新建、更新、
//! 单条/全部删除和按名称全文搜索。
//!
//! 分层结构：
//! - `app`：业务路由、处理器、服务、存储和视图
//! - `core`：错误边界、中间件、响应封装
//! - `infrastructure`：数据库连接、日志、上传文件落盘
//! - `config`：环境变量配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::build_router;
pub use app::users::handler::AppState;
pub use config::AppConfig;
