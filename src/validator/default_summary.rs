//! 预置诊断摘要
//!
//! 校验失败（或还没有任何文件）时，界面不显示真正的摘要，
//! 而是按场景显示一块预先写好的诊断面板。纯查表，无计算。

use serde::{Deserialize, Serialize};

use super::file_validator::ValidationScenario;

/// 诊断面板的严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    Success,
    Error,
    Warning,
    Info,
}

/// 预置诊断摘要（标题 / 正文 / 严重级别）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSummary {
    pub title: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub summary_type: SummaryType,
}

/// 按场景生成预置诊断摘要
///
/// `file_name` 会被代入正文模板；场景缺失（或解析失败）时
/// 回退到 NO_FILES 模板。调用方没有文件名时传 "document"。
pub fn generate_default_summary(
    scenario: Option<ValidationScenario>,
    file_name: &str,
) -> DefaultSummary {
    match scenario {
        Some(ValidationScenario::EmptyFile) => DefaultSummary {
            title: "⚠️ Empty File Detected".to_string(),
            summary: format!(
                "The file \"{}\" appears to be empty and contains no content to summarize.\n\n\
                 **Possible reasons:**\n\
                 • The file was not saved properly\n\
                 • The file is corrupted\n\
                 • The file format is not readable\n\n\
                 **Recommendation:** Please check the original file and try uploading again.",
                file_name
            ),
            summary_type: SummaryType::Warning,
        },
        Some(ValidationScenario::CorruptedFile) => DefaultSummary {
            title: "❌ Corrupted File Detected".to_string(),
            summary: format!(
                "The file \"{}\" appears to be corrupted or damaged.\n\n\
                 **Issue Details:**\n\
                 • File signature does not match the file extension\n\
                 • The file structure is invalid\n\
                 • Content cannot be reliably extracted\n\n\
                 **Recommendation:** Try to repair the file or upload a different version.",
                file_name
            ),
            summary_type: SummaryType::Error,
        },
        Some(ValidationScenario::UnsafeFile) => DefaultSummary {
            title: "🛡️ Unsafe File Detected".to_string(),
            summary: format!(
                "The file \"{}\" has been flagged as potentially unsafe.\n\n\
                 **Security Concerns:**\n\
                 • File may contain executable code\n\
                 • File type is not permitted for security reasons\n\
                 • Suspicious file extension detected\n\n\
                 **Action Required:** For your security, this file cannot be processed. \
                 Please only upload document files (PDF, Word, Excel, etc.).",
                file_name
            ),
            summary_type: SummaryType::Error,
        },
        Some(ValidationScenario::ProcessingError) => DefaultSummary {
            title: "⚠️ Processing Error".to_string(),
            summary: format!(
                "An error occurred while processing \"{}\".\n\n\
                 **Common causes:**\n\
                 • File format is not fully supported\n\
                 • File contains encrypted or password-protected content\n\
                 • Network connection issue\n\n\
                 **Recommendation:** Try uploading the file again or convert it to a different format.",
                file_name
            ),
            summary_type: SummaryType::Error,
        },
        // NO_FILES 同时也是未知/缺失场景的回退模板
        Some(ValidationScenario::NoFiles) | None => DefaultSummary {
            title: "📄 No Files Uploaded".to_string(),
            summary: "No files have been uploaded yet.\n\n\
                 **To get started:**\n\
                 1. Click the upload area or drag files\n\
                 2. Select one or more documents\n\
                 3. Choose your summary preferences\n\
                 4. Click \"Summarize\" to generate insights\n\n\
                 **Supported formats:** PDF, Word, Excel, PowerPoint, Images, Text files"
                .to_string(),
            summary_type: SummaryType::Info,
        },
    }
}
