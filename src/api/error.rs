//! API 错误类型
//!
//! Display 文案直接给界面展示，连接/超时两条沿用旧版前端的提示语。

use thiserror::Error;

/// 后端 API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 无法连接到后端
    #[error("Cannot connect to server. Please ensure the backend is running on {0}")]
    Connection(String),

    /// 请求超时
    #[error("Request timeout - the summarization is taking too long. Please try with a smaller file or shorter text.")]
    Timeout,

    /// 后端返回的业务错误（detail 来自响应体）
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    /// 响应解析失败
    #[error("Invalid response from server: {0}")]
    Decode(String),

    /// 本地文件读取失败（构造上传请求时）
    #[error("Failed to read file: {0}")]
    File(String),

    /// 离线 PIN 验证失败（本地回退路径）
    #[error("Invalid PIN")]
    InvalidPin,
}

impl ApiError {
    /// 是否是连接层失败（触发离线回退的唯一条件）
    ///
    /// 后端明确返回的 401/4xx 是权威结论，不回退。
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
