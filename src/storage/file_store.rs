//! 文件键值存储
//!
//! 每个键对应数据目录下的一个 JSON 文件：`~/.docmind/storage/{key}.json`。
//! 写入在进程内串行化；跨进程/跨标签页的并发写入不做处理。

use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;

use super::kv::KeyValueStore;

/// 基于文件的键值存储
pub struct FileKeyValueStore {
    /// 存储根目录
    base_dir: PathBuf,
    /// 进程内写入锁
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// 创建存储服务，默认使用 ~/.docmind/storage 目录
    pub fn new() -> Result<Self, String> {
        Self::with_base_dir(Self::get_default_base_dir()?)
    }

    /// 使用指定目录创建存储服务
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, String> {
        fs::create_dir_all(&base_dir).map_err(|e| format!("创建存储目录失败: {}", e))?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    /// 获取默认存储目录
    fn get_default_base_dir() -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("无法获取用户主目录")?;
        Ok(home.join(".docmind").join("storage"))
    }

    /// 键对应的文件路径
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self.write_lock.lock();
        fs::write(self.key_path(key), value)
            .map_err(|e| format!("写入存储键 {} 失败: {}", key, e))
    }

    fn remove(&self, key: &str) {
        let _guard = self.write_lock.lock();
        let path = self.key_path(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("[Storage] 删除存储键 {} 失败: {}", key, e);
            }
        }
    }
}
