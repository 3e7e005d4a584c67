//! 配置管理模块
//!
//! 应用配置保存为 `~/.docmind/config.json`，
//! 缺失或损坏时回退到默认值，不阻止启动。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// 默认后端地址
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// 摘要请求超时（秒）
pub const DEFAULT_SUMMARIZE_TIMEOUT_SECS: u64 = 180;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// 后端 API 根地址
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// 摘要请求超时（秒）
    #[serde(default = "default_summarize_timeout")]
    pub summarize_timeout_secs: u64,
    /// 数据目录覆盖（默认 ~/.docmind）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_summarize_timeout() -> u64 {
    DEFAULT_SUMMARIZE_TIMEOUT_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            summarize_timeout_secs: default_summarize_timeout(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// 拼接后端接口完整地址
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }

    /// 数据目录（配置覆盖优先，默认 ~/.docmind）
    pub fn data_dir(&self) -> Result<PathBuf, String> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir().ok_or("无法获取用户主目录")?;
        Ok(home.join(".docmind"))
    }

    /// 默认配置文件路径
    fn config_path() -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("无法获取用户主目录")?;
        Ok(home.join(".docmind").join("config.json"))
    }

    /// 从默认路径加载配置，缺失或损坏时返回默认值
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(path),
            Err(e) => {
                tracing::warn!("[Config] {}，使用默认配置", e);
                Self::default()
            }
        }
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let content = match fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[Config] 配置解析失败，使用默认配置: {}", e);
                Self::default()
            }
        }
    }

    /// 保存配置到指定路径
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("创建配置目录失败: {}", e))?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("序列化配置失败: {}", e))?;
        fs::write(path, content).map_err(|e| format!("写入配置失败: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.summarize_timeout_secs, 180);
    }

    #[test]
    fn test_endpoint_join() {
        let config = AppConfig {
            api_base_url: "http://localhost:8000/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint("/auth/login"),
            "http://localhost:8000/auth/login"
        );
    }

    #[test]
    fn test_load_missing_returns_default() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_from(temp.path().join("nope.json"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let config = AppConfig {
            api_base_url: "http://10.0.0.2:9000".to_string(),
            summarize_timeout_secs: 60,
            data_dir: None,
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(path);
        assert_eq!(loaded.api_base_url, "http://10.0.0.2:9000");
        assert_eq!(loaded.summarize_timeout_secs, 60);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, r#"{"apiBaseUrl":"http://remote:8000"}"#).unwrap();

        let loaded = AppConfig::load_from(path);
        assert_eq!(loaded.api_base_url, "http://remote:8000");
        assert_eq!(loaded.summarize_timeout_secs, DEFAULT_SUMMARIZE_TIMEOUT_SECS);
    }
}
