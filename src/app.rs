//! 应用核心编排
//!
//! 把配置、存储、校验器和 API 客户端按界面流程串起来：
//! PIN 开通（后端登记 + 本地保存）、摘要提交（校验门禁 → 上传 → 记历史）。
//! 界面事件处理器只跟这一层打交道。

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::auth::{OfflineAuthStore, SessionStore};
use crate::config::AppConfig;
use crate::files::FileSource;
use crate::history::ChatHistoryStore;
use crate::models::{ChatHistoryEntry, FileSummary, SummarySettings, UserProfile};
use crate::storage::{FileKeyValueStore, KeyValueStore};
use crate::validator::{
    generate_default_summary, validate_files, DefaultSummary, FileValidation, ValidationScenario,
};

/// 被校验拒绝的文件及其诊断信息
#[derive(Debug)]
pub struct RejectedFile {
    pub file_name: String,
    pub validation: FileValidation,
    /// 带场景标签的失败对应的诊断面板；累积型失败（大小/类型）为 None，
    /// 界面直接展示 validation.errors
    pub panel: Option<DefaultSummary>,
}

/// 一次摘要提交的结果
#[derive(Debug)]
pub struct SummarizeOutcome {
    /// 后端返回的各文件摘要（只包含通过校验的文件）
    pub summaries: Vec<FileSummary>,
    /// 被本地校验拦下的文件（从未进入上传载荷）
    pub rejected: Vec<RejectedFile>,
}

/// 应用核心
pub struct AppCore<S: KeyValueStore> {
    config: AppConfig,
    client: ApiClient,
    offline: OfflineAuthStore<Arc<S>>,
    session: SessionStore<Arc<S>>,
    history: ChatHistoryStore<Arc<S>>,
}

impl AppCore<FileKeyValueStore> {
    /// 按默认配置和数据目录创建
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::load();
        let store = FileKeyValueStore::with_base_dir(config.data_dir()?.join("storage"))?;
        Ok(Self::with_parts(config, store))
    }
}

impl<S: KeyValueStore> AppCore<S> {
    /// 用指定配置和存储组装（测试时注入内存存储）
    pub fn with_parts(config: AppConfig, store: S) -> Self {
        let store = Arc::new(store);
        Self {
            client: ApiClient::new(&config),
            offline: OfflineAuthStore::new(Arc::clone(&store)),
            session: SessionStore::new(Arc::clone(&store)),
            history: ChatHistoryStore::new(store),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn offline(&self) -> &OfflineAuthStore<Arc<S>> {
        &self.offline
    }

    pub fn session(&self) -> &SessionStore<Arc<S>> {
        &self.session
    }

    pub fn history(&self) -> &ChatHistoryStore<Arc<S>> {
        &self.history
    }

    /// 开通离线访问
    ///
    /// PIN 规则在这里把关（长度 ≥ 4、二次确认一致），
    /// 然后先在后端登记，成功后再写本地缓存——后端失败时
    /// 本地不留半套状态。
    pub async fn enroll_offline_pin(
        &self,
        user: &UserProfile,
        pin: &str,
        confirm_pin: &str,
    ) -> Result<(), String> {
        if pin.chars().count() < 4 {
            return Err("PIN must be at least 4 digits".to_string());
        }
        if pin != confirm_pin {
            return Err("PINs do not match".to_string());
        }

        self.client
            .setup_offline_pin(&user.email, pin)
            .await
            .map_err(|e| e.to_string())?;
        self.offline.save_offline_user(user, pin)
    }

    /// 提交摘要请求
    ///
    /// 流程：校验所有文件 → 被拒绝的生成诊断信息、不进上传载荷 →
    /// 通过的打包上传 → 记一条历史（新的在前）。
    /// 没有任何文件通过校验时不发网络请求。
    pub async fn summarize<F: FileSource>(
        &self,
        files: &[F],
        prompt: &str,
        settings: &SummarySettings,
    ) -> Result<SummarizeOutcome, ApiError> {
        if files.is_empty() {
            // 界面在空选择时展示 NO_FILES 面板
            return Ok(SummarizeOutcome {
                summaries: Vec::new(),
                rejected: vec![RejectedFile {
                    file_name: "document".to_string(),
                    validation: FileValidation {
                        valid: false,
                        errors: vec!["Please upload at least one file".to_string()],
                        scenario: Some(ValidationScenario::NoFiles),
                    },
                    panel: Some(generate_default_summary(
                        Some(ValidationScenario::NoFiles),
                        "document",
                    )),
                }],
            });
        }

        let results = validate_files(files).await;

        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for result in results {
            if result.validation.valid {
                accepted.push(result.file);
            } else {
                let name = result.file.name().to_string();
                tracing::info!(
                    "[App] 文件被校验拦截: {} ({:?})",
                    name,
                    result.validation.scenario
                );
                let panel = result
                    .validation
                    .scenario
                    .map(|s| generate_default_summary(Some(s), &name));
                rejected.push(RejectedFile {
                    file_name: name,
                    validation: result.validation,
                    panel,
                });
            }
        }

        let summaries = if accepted.is_empty() {
            Vec::new()
        } else {
            self.client
                .summarize_files(&accepted, settings, self.session.user_id())
                .await?
        };

        let entry_prompt = if prompt.trim().is_empty() {
            "Summarize documents".to_string()
        } else {
            prompt.to_string()
        };
        let entry = ChatHistoryEntry::new(
            entry_prompt,
            files.iter().map(|f| f.name().to_string()).collect(),
            settings.clone(),
        );
        if let Err(e) = self.history.add(entry) {
            // 历史只是辅助功能，写入失败不影响摘要结果
            tracing::warn!("[App] 历史记录写入失败: {}", e);
        }

        Ok(SummarizeOutcome {
            summaries,
            rejected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::MemoryFile;
    use crate::storage::MemoryKeyValueStore;

    fn offline_core() -> AppCore<MemoryKeyValueStore> {
        // 后端不可达：只有不需要网络的路径会成功
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        AppCore::with_parts(config, MemoryKeyValueStore::new())
    }

    #[tokio::test]
    async fn test_empty_selection_yields_no_files_panel() {
        let core = offline_core();
        let outcome = core
            .summarize::<MemoryFile>(&[], "", &SummarySettings::default())
            .await
            .unwrap();
        assert!(outcome.summaries.is_empty());
        assert_eq!(outcome.rejected.len(), 1);
        let panel = outcome.rejected[0].panel.as_ref().unwrap();
        assert_eq!(panel.title, "📄 No Files Uploaded");
    }

    #[tokio::test]
    async fn test_all_rejected_skips_network_and_records_history() {
        let core = offline_core();
        let files = vec![
            MemoryFile::new("empty.pdf", Vec::new()),
            MemoryFile::new("tool.exe.docx", b"not a zip".to_vec()),
        ];
        let outcome = core
            .summarize(&files, "summarize these", &SummarySettings::default())
            .await
            .unwrap();

        assert!(outcome.summaries.is_empty());
        assert_eq!(outcome.rejected.len(), 2);
        assert!(outcome.rejected.iter().all(|r| r.panel.is_some()));

        let history = core.history().list();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].prompt, "summarize these");
        assert_eq!(history[0].files.len(), 2);
    }

    #[tokio::test]
    async fn test_accepted_files_hit_network() {
        let core = offline_core();
        let files = vec![MemoryFile::new("ok.txt", b"hello world".to_vec())];
        // 有通过校验的文件时会尝试上传，后端不可达 → 连接错误
        let err = core
            .summarize(&files, "", &SummarySettings::default())
            .await
            .unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn test_enroll_rejects_short_pin() {
        let core = offline_core();
        let user = UserProfile {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            picture: None,
        };
        let err = core.enroll_offline_pin(&user, "12", "12").await.unwrap_err();
        assert_eq!(err, "PIN must be at least 4 digits");

        let err = core
            .enroll_offline_pin(&user, "1234", "5678")
            .await
            .unwrap_err();
        assert_eq!(err, "PINs do not match");

        // 规则检查都没过，本地不应该有任何缓存
        assert!(!core.offline().has_offline_access());
    }

    #[tokio::test]
    async fn test_enroll_requires_backend() {
        let core = offline_core();
        let user = UserProfile {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            picture: None,
        };
        // 后端登记失败时不写本地缓存
        assert!(core.enroll_offline_pin(&user, "1234", "1234").await.is_err());
        assert!(!core.offline().has_offline_access());
    }
}
