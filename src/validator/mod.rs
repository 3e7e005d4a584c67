//! 文件校验模块
//!
//! 在文件进入摘要上传流程之前拦截不可读、超大、不支持、
//! 损坏或不安全的文件。提供以下功能：
//! - 单文件校验（大小、扩展名、二进制签名、可疑文件名）
//! - 多文件并发校验（结果按输入顺序返回）
//! - 按场景生成预置的诊断摘要面板

mod default_summary;
mod file_validator;

pub use default_summary::{generate_default_summary, DefaultSummary, SummaryType};
pub use file_validator::{
    validate_file, validate_files, FileValidation, ValidatedFile, ValidationScenario,
    ALLOWED_EXTENSIONS, MAX_FILE_SIZE,
};
