//! 日志基础设施

use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

pub struct Logger;

impl Logger {
    /// `RUST_LOG` 优先，未设置时使用 `level`
    pub fn init(level: Level) {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .from_env_lossy();

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}
