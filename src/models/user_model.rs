//! 用户相关数据类型
//!
//! 持久化的 JSON 字段名与前端 localStorage 里的旧数据保持一致
//! （camelCase：`savedAt`、`offlineEnabled`），保证升级后还能读到
//! 之前保存的离线凭证。

use serde::{Deserialize, Serialize};

/// 在线认证完成后的用户资料（开通离线访问时的输入）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// 显示名
    pub name: String,
    /// 邮箱
    pub email: String,
    /// 头像 URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// 本地缓存的离线凭证记录（`offline_user` 键，至多一条）
///
/// 新的开通操作会静默覆盖旧记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedOfflineUser {
    /// 显示名
    pub name: String,
    /// 邮箱
    pub email: String,
    /// 头像 URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// PIN 校验和（十进制字符串，不存明文）
    pub pin: String,
    /// 保存时间（ISO-8601）
    pub saved_at: String,
    /// 离线访问开关
    pub offline_enabled: bool,
}

impl CachedOfflineUser {
    /// 由用户资料和已算好的 PIN 校验和构造一条新记录
    pub fn new(user: &UserProfile, pin_hash: String) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.picture.clone(),
            pin: pin_hash,
            saved_at: chrono::Utc::now().to_rfc3339(),
            offline_enabled: true,
        }
    }
}

/// PIN 验证成功后返回的用户视图（不含校验和）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineUserView {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// 固定为 "offline"，界面用来区分登录方式
    pub auth_method: String,
}

/// 仅用于展示的离线用户信息（"正在以 … 登录"）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineUserInfo {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// 当前登录用户缓存（`user` 键，含后端签发的 token）
///
/// 所有字段都可能缺失：损坏或半旧的数据按字段降级而不是整体报错。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}
