//! 后端 API 客户端
//!
//! 接口路径和载荷与后端（FastAPI）一一对应。
//! 认证类请求是 JSON；摘要和图片分析是 multipart 上传，
//! 摘要请求带 3 分钟超时，客户端不做重试。

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::files::FileSource;
use crate::models::{
    ApiErrorBody, AuthResponse, FileSummary, GoogleAuthRequest, ImageAnalysisResponse,
    LoginRequest, OfflinePinLoginRequest, OfflinePinSetupRequest, PinSetupResponse, SignupRequest,
    SummarySettings,
};

use super::error::ApiError;

// 接口路径
const SIGNUP_PATH: &str = "/auth/signup";
const LOGIN_PATH: &str = "/auth/login";
const GOOGLE_AUTH_PATH: &str = "/auth/google-auth";
const SETUP_OFFLINE_PIN_PATH: &str = "/auth/setup-offline-pin";
const OFFLINE_LOGIN_PATH: &str = "/auth/offline-login";
const SUMMARIZE_PATH: &str = "/summarize/summarize";
const ANALYZE_IMAGE_PATH: &str = "/image/analyze-image";

/// 后端 API 客户端
pub struct ApiClient {
    base_url: String,
    client: Client,
    summarize_timeout: Duration,
}

impl ApiClient {
    /// 按配置创建客户端
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            summarize_timeout: Duration::from_secs(config.summarize_timeout_secs),
        }
    }

    /// 指定根地址创建客户端（测试用）
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(&AppConfig {
            api_base_url: base_url.into(),
            ..Default::default()
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Connection(self.base_url.clone())
        }
    }

    /// 解出成功响应体，失败时取 `{detail}` 组装后端错误
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<R>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let detail = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|b| b.detail)
            .unwrap_or_else(|| format!("Server error ({})", status.as_u16()));
        tracing::warn!("[ApiClient] 后端返回错误 {}: {}", status.as_u16(), detail);
        Err(ApiError::Backend {
            status: status.as_u16(),
            detail,
        })
    }

    async fn post_json<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.handle_response(response).await
    }

    // ========================================================================
    // 认证接口
    // ========================================================================

    /// 邮箱注册
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        self.post_json(
            SIGNUP_PATH,
            &SignupRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                auth_method: "email".to_string(),
            },
        )
        .await
    }

    /// 邮箱登录
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.post_json(
            LOGIN_PATH,
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    /// Google 授权登录（token 交换）
    pub async fn google_auth(
        &self,
        token: &str,
        email: &str,
        name: &str,
        picture: Option<&str>,
    ) -> Result<AuthResponse, ApiError> {
        self.post_json(
            GOOGLE_AUTH_PATH,
            &GoogleAuthRequest {
                token: token.to_string(),
                email: email.to_string(),
                name: name.to_string(),
                picture: picture.map(|p| p.to_string()),
            },
        )
        .await
    }

    /// 在后端登记离线 PIN
    pub async fn setup_offline_pin(
        &self,
        email: &str,
        pin: &str,
    ) -> Result<PinSetupResponse, ApiError> {
        self.post_json(
            SETUP_OFFLINE_PIN_PATH,
            &OfflinePinSetupRequest {
                email: email.to_string(),
                pin: pin.to_string(),
            },
        )
        .await
    }

    /// 在线离线 PIN 登录（主路径，不可达时由调用方回退本地验证）
    pub async fn offline_login(&self, email: &str, pin: &str) -> Result<AuthResponse, ApiError> {
        self.post_json(
            OFFLINE_LOGIN_PATH,
            &OfflinePinLoginRequest {
                email: email.to_string(),
                pin: pin.to_string(),
            },
        )
        .await
    }

    // ========================================================================
    // 摘要与图片分析
    // ========================================================================

    /// 提交文件摘要请求
    ///
    /// multipart 载荷：重复的 `files` 部分 + `settings_json` + 可选 `user_id`。
    /// 调用方负责只传入通过校验的文件。
    pub async fn summarize_files<F: FileSource>(
        &self,
        files: &[&F],
        settings: &SummarySettings,
        user_id: Option<i64>,
    ) -> Result<Vec<FileSummary>, ApiError> {
        tracing::info!("[ApiClient] 提交摘要请求，共 {} 个文件", files.len());

        let mut form = Form::new();
        for file in files {
            let bytes = file.read_bytes().await.map_err(ApiError::File)?;
            form = form.part(
                "files",
                Part::bytes(bytes).file_name(file.name().to_string()),
            );
        }
        let settings_json =
            serde_json::to_string(settings).map_err(|e| ApiError::Decode(e.to_string()))?;
        form = form.text("settings_json", settings_json);
        if let Some(id) = user_id {
            form = form.text("user_id", id.to_string());
        }

        let response = self
            .client
            .post(self.endpoint(SUMMARIZE_PATH))
            .multipart(form)
            .timeout(self.summarize_timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.handle_response(response).await
    }

    /// 提交图片分析请求
    pub async fn analyze_image<F: FileSource>(
        &self,
        image: &F,
        generate_story: bool,
        story_prompt: Option<&str>,
        user_id: Option<i64>,
    ) -> Result<ImageAnalysisResponse, ApiError> {
        let bytes = image.read_bytes().await.map_err(ApiError::File)?;
        let mut form = Form::new()
            .part(
                "image",
                Part::bytes(bytes).file_name(image.name().to_string()),
            )
            .text("generate_story", generate_story.to_string());
        if let Some(prompt) = story_prompt {
            form = form.text("story_prompt", prompt.to_string());
        }
        if let Some(id) = user_id {
            form = form.text("user_id", id.to_string());
        }

        let response = self
            .client
            .post(self.endpoint(ANALYZE_IMAGE_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.handle_response(response).await
    }
}
