//! 文件校验逻辑
//!
//! 校验顺序和错误文案沿用旧版前端，界面据此决定展示哪一条诊断：
//! 空文件、签名不匹配、可疑文件名三类带场景标签并立即短路，
//! 其中签名不匹配会丢弃之前累积的大小/类型错误；
//! 大小超限和类型不支持只累积，没有更严重的问题时才一起报告。

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::files::FileSource;

/// 最大文件大小（50 MiB）
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// 允许的扩展名（对文件名最后一个 `.` 之后的部分做大小写不敏感匹配）
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "xlsx", "xls", "ppt", "pptx", "jpg", "jpeg", "png", "gif",
];

/// 可疑文件名子串（大小写不敏感，出现在文件名任意位置即拒绝）
const SUSPICIOUS_PATTERNS: &[&str] = &[".exe", ".bat", ".cmd", ".sh", ".ps1"];

/// 签名检查读取的前缀长度
const SIGNATURE_PREFIX_LEN: usize = 4;

/// 各扩展名期望的文件头字节（magic number）
///
/// txt 和表里没有的扩展名不做签名检查。
static FILE_SIGNATURES: Lazy<HashMap<&'static str, &'static [u8]>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, &'static [u8]> = HashMap::new();
    m.insert("pdf", &[0x25, 0x50, 0x44, 0x46]); // %PDF
    m.insert("png", &[0x89, 0x50, 0x4E, 0x47]);
    m.insert("jpg", &[0xFF, 0xD8, 0xFF]);
    m.insert("jpeg", &[0xFF, 0xD8, 0xFF]);
    m.insert("gif", &[0x47, 0x49, 0x46]);
    // ZIP 容器格式
    m.insert("docx", &[0x50, 0x4B, 0x03, 0x04]);
    m.insert("xlsx", &[0x50, 0x4B, 0x03, 0x04]);
    m.insert("pptx", &[0x50, 0x4B, 0x03, 0x04]);
    m
});

/// 校验失败场景标签
///
/// 带场景的失败在界面上对应一块预置的诊断面板，
/// 序列化形式与旧版前端的字符串一致（如 `EMPTY_FILE`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationScenario {
    /// 零字节文件
    EmptyFile,
    /// 文件头与扩展名不匹配
    CorruptedFile,
    /// 文件名可疑（可执行后缀）
    UnsafeFile,
    /// 尚未选择任何文件
    NoFiles,
    /// 后端处理失败
    ProcessingError,
}

impl ValidationScenario {
    /// 从旧版字符串解析，未知值返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EMPTY_FILE" => Some(Self::EmptyFile),
            "CORRUPTED_FILE" => Some(Self::CorruptedFile),
            "UNSAFE_FILE" => Some(Self::UnsafeFile),
            "NO_FILES" => Some(Self::NoFiles),
            "PROCESSING_ERROR" => Some(Self::ProcessingError),
            _ => None,
        }
    }
}

impl std::fmt::Display for ValidationScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFile => write!(f, "EMPTY_FILE"),
            Self::CorruptedFile => write!(f, "CORRUPTED_FILE"),
            Self::UnsafeFile => write!(f, "UNSAFE_FILE"),
            Self::NoFiles => write!(f, "NO_FILES"),
            Self::ProcessingError => write!(f, "PROCESSING_ERROR"),
        }
    }
}

/// 单个文件的校验结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileValidation {
    /// 是否通过
    pub valid: bool,
    /// 人类可读的错误信息（按发现顺序）
    pub errors: Vec<String>,
    /// 场景标签（仅空文件/损坏/不安全三类短路失败携带）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ValidationScenario>,
}

impl FileValidation {
    fn accepted() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            scenario: None,
        }
    }

    fn rejected(errors: Vec<String>, scenario: Option<ValidationScenario>) -> Self {
        Self {
            valid: false,
            errors,
            scenario,
        }
    }
}

/// 文件与其校验结果的配对（validate_files 的输出）
pub struct ValidatedFile<'a, F: FileSource> {
    pub file: &'a F,
    pub validation: FileValidation,
}

/// 取文件名最后一个 `.` 之后的部分，统一小写
///
/// 没有 `.` 时整个文件名都算"扩展名"，与旧版行为一致。
fn extract_extension(file_name: &str) -> String {
    file_name.rsplit('.').next().unwrap_or("").to_lowercase()
}

/// 读取前缀字节并与扩展名对应的签名比对
///
/// txt 和表里没有的扩展名直接放行；前缀读取失败视为不匹配
/// （读不到头四个字节的文件同样无法可靠提取内容）。
async fn check_file_signature<F: FileSource>(file: &F, extension: &str) -> bool {
    if extension == "txt" {
        return true;
    }
    let Some(signature) = FILE_SIGNATURES.get(extension) else {
        return true;
    };
    match file.read_prefix(SIGNATURE_PREFIX_LEN).await {
        Ok(prefix) => {
            prefix.len() >= signature.len() && &prefix[..signature.len()] == *signature
        }
        Err(e) => {
            tracing::warn!("[FileValidator] 读取文件头失败，按签名不匹配处理: {}", e);
            false
        }
    }
}

/// 校验单个文件
///
/// 检查顺序（与界面展示优先级一致，实现时不可调整）：
/// 1. 文件缺失：通用错误，无场景
/// 2. 零字节：EMPTY_FILE，短路
/// 3. 大小超限：累积错误，继续
/// 4. 扩展名不支持：累积错误，继续
/// 5. 签名不匹配：CORRUPTED_FILE，丢弃已累积错误并短路
/// 6. 文件名可疑：UNSAFE_FILE，短路
/// 7. 有累积错误则拒绝（无场景），否则通过
pub async fn validate_file<F: FileSource>(file: Option<&F>) -> FileValidation {
    let Some(file) = file else {
        return FileValidation::rejected(vec!["No file provided".to_string()], None);
    };

    if file.size() == 0 {
        return FileValidation::rejected(
            vec!["File is empty".to_string()],
            Some(ValidationScenario::EmptyFile),
        );
    }

    let mut errors = Vec::new();

    if file.size() > MAX_FILE_SIZE {
        errors.push(format!("File size exceeds {}MB limit", MAX_FILE_SIZE / 1024 / 1024));
    }

    let extension = extract_extension(file.name());
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        errors.push(format!("File type .{} is not supported", extension));
    }

    if !check_file_signature(file, &extension).await {
        tracing::debug!(
            "[FileValidator] 签名不匹配: {} (.{})",
            file.name(),
            extension
        );
        return FileValidation::rejected(
            vec![format!(
                "File appears to be corrupted or not a valid .{} file",
                extension
            )],
            Some(ValidationScenario::CorruptedFile),
        );
    }

    let lower_name = file.name().to_lowercase();
    if SUSPICIOUS_PATTERNS.iter().any(|p| lower_name.contains(p)) {
        tracing::debug!("[FileValidator] 可疑文件名: {}", file.name());
        return FileValidation::rejected(
            vec!["File appears to be unsafe or executable".to_string()],
            Some(ValidationScenario::UnsafeFile),
        );
    }

    if !errors.is_empty() {
        return FileValidation::rejected(errors, None);
    }

    FileValidation::accepted()
}

/// 并发校验多个文件
///
/// 每个文件独立校验，签名读取并发进行；
/// 完成顺序无关紧要，结果一律按输入顺序返回。
pub async fn validate_files<F: FileSource>(files: &[F]) -> Vec<ValidatedFile<'_, F>> {
    futures::future::join_all(files.iter().map(|file| async move {
        ValidatedFile {
            file,
            validation: validate_file(Some(file)).await,
        }
    }))
    .await
}
