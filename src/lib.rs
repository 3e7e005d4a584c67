//! DocuMind AI 客户端核心库
//!
//! 提供文档摘要客户端的非界面逻辑：
//! - 离线凭证存储（PIN 校验和、本地登录回退）
//! - 文件校验（大小、扩展名、二进制签名、可疑文件名）
//! - 聊天历史存储
//! - 后端 API 客户端（注册/登录/Google 授权/离线 PIN/文件摘要）
//!
//! 界面层只负责渲染和事件转发，所有状态与失败语义都在这里。

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod files;
pub mod history;
pub mod logging;
pub mod models;
pub mod storage;
pub mod validator;

pub use api::{ApiClient, ApiError};
pub use app::{AppCore, RejectedFile, SummarizeOutcome};
pub use auth::{hash_pin, offline_login_with_fallback, LoginOutcome, OfflineAuthStore, SessionStore};
pub use config::AppConfig;
pub use files::{DiskFile, FileSource, MemoryFile};
pub use history::ChatHistoryStore;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use validator::{
    generate_default_summary, validate_file, validate_files, DefaultSummary, FileValidation,
    SummaryType, ValidationScenario,
};
