//! 聊天历史数据类型

use serde::{Deserialize, Serialize};

/// 摘要设置
///
/// `userQuery` 是随 multipart 一起提交给后端的附加提示词。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySettings {
    /// 摘要长度（short / medium / long）
    pub length: String,
    /// 摘要风格（paragraph / bullet / flashcard / mindmap / keypoints）
    pub style: String,
    /// 用户附加提示词
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_query: Option<String>,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            length: "medium".to_string(),
            style: "paragraph".to_string(),
            user_query: None,
        }
    }
}

/// 一次摘要请求的历史记录（`chat_history` 键，列表，新的在前）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryEntry {
    /// 条目 ID
    pub id: String,
    /// 提示词（为空时界面显示默认文案）
    pub prompt: String,
    /// 提交的文件名列表
    pub files: Vec<String>,
    /// 创建时间（Unix 时间戳，毫秒）
    pub timestamp: i64,
    /// 本次请求的摘要设置
    pub settings: SummarySettings,
    /// 摘要结果（请求完成后回填）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ChatHistoryEntry {
    /// 创建新的历史条目
    pub fn new(prompt: String, files: Vec<String>, settings: SummarySettings) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            prompt,
            files,
            timestamp: chrono::Utc::now().timestamp_millis(),
            settings,
            summary: None,
        }
    }
}
