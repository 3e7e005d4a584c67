//! 认证模块
//!
//! 提供以下功能：
//! - PIN 校验和计算（沿用前端旧版公式，保证已保存数据可用）
//! - 离线凭证存储（保存/验证/查询/删除）
//! - 当前登录用户缓存（`user` 键）
//! - 离线登录回退流程（后端不可达时走本地验证）

mod flow;
mod offline;
mod pin;
mod session;

pub use flow::{offline_login_with_fallback, LoginOutcome};
pub use offline::OfflineAuthStore;
pub use pin::hash_pin;
pub use session::SessionStore;
