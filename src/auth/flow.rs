//! 离线登录回退流程
//!
//! 离线 PIN 登录优先走后端接口（后端可以吊销 PIN、签发 token）；
//! 只有连接层失败才回退到本地校验和验证。后端明确拒绝（401 等）
//! 是权威结论，不做本地兜底。

use crate::api::{ApiClient, ApiError};
use crate::models::{AuthResponse, OfflineUserView};
use crate::storage::KeyValueStore;

use super::offline::OfflineAuthStore;

/// 离线登录的最终结果
#[derive(Debug)]
pub enum LoginOutcome {
    /// 后端验证通过，携带 token
    Online(AuthResponse),
    /// 后端不可达，本地校验和验证通过（无 token，功能受限）
    OfflineFallback(OfflineUserView),
}

/// 离线 PIN 登录（带本地回退）
///
/// 本地回退路径上，"没有缓存用户"和"PIN 错误"统一返回
/// [`ApiError::InvalidPin`]，界面不区分两者。
pub async fn offline_login_with_fallback<S: KeyValueStore>(
    client: &ApiClient,
    offline: &OfflineAuthStore<S>,
    email: &str,
    pin: &str,
) -> Result<LoginOutcome, ApiError> {
    match client.offline_login(email, pin).await {
        Ok(response) => Ok(LoginOutcome::Online(response)),
        Err(err) if err.is_connection() => {
            tracing::warn!("[Auth] 离线登录接口不可达，回退本地验证");
            match offline.verify_offline_pin(pin) {
                Some(view) => Ok(LoginOutcome::OfflineFallback(view)),
                None => Err(ApiError::InvalidPin),
            }
        }
        Err(err) => Err(err),
    }
}
