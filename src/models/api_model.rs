//! 后端 API 请求/响应类型
//!
//! 字段名跟随后端（FastAPI）的 snake_case 约定，
//! 摘要结果里的 `fileName` 是后端返回的原始写法。

use serde::{Deserialize, Serialize};

/// 注册请求体
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// 固定为 "email"
    pub auth_method: String,
}

/// 邮箱登录请求体
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Google 授权请求体
#[derive(Debug, Clone, Serialize)]
pub struct GoogleAuthRequest {
    pub token: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// 离线 PIN 设置请求体
#[derive(Debug, Clone, Serialize)]
pub struct OfflinePinSetupRequest {
    pub email: String,
    pub pin: String,
}

/// 离线 PIN 登录请求体
#[derive(Debug, Clone, Serialize)]
pub struct OfflinePinLoginRequest {
    pub email: String,
    pub pin: String,
}

/// 认证响应里的用户信息
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub picture: Option<String>,
    /// 仅 google-auth 响应携带
    #[serde(default)]
    pub offline_enabled: Option<bool>,
}

/// 认证响应（signup / login / google-auth / offline-login）
///
/// /auth/login 只返回 token，不带 user。
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

/// 离线 PIN 设置响应
#[derive(Debug, Clone, Deserialize)]
pub struct PinSetupResponse {
    pub success: bool,
    pub message: String,
}

/// 后端错误响应体
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// 单个文件的摘要结果（成功带 summary，失败带 error）
#[derive(Debug, Clone, Deserialize)]
pub struct FileSummary {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 图片分析响应
#[derive(Debug, Clone, Deserialize)]
pub struct ImageAnalysisResponse {
    pub analysis: String,
    #[serde(default)]
    pub story: Option<String>,
}
