//! 基础设施层：数据库连接、日志、上传文件落盘

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
pub mod uploads;
