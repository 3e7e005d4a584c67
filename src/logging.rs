//! 日志初始化

use tracing::Level;

/// 初始化全局日志订阅器
///
/// 重复调用只有第一次生效（返回 false 表示已经初始化过）。
pub fn init_logging(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
}
