//! 文件来源实现

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

/// 待校验/上传的候选文件
///
/// `read_prefix` 是唯一的挂起点：读取指定长度的前缀字节，
/// 文件比前缀短时返回实际读到的部分。读取不支持取消和超时。
#[async_trait]
pub trait FileSource: Send + Sync {
    /// 文件名（含扩展名，用于扩展名与签名判断）
    fn name(&self) -> &str;

    /// 字节长度
    fn size(&self) -> u64;

    /// 异步读取前 `len` 个字节
    async fn read_prefix(&self, len: usize) -> Result<Vec<u8>, String>;

    /// 异步读取完整内容（上传用）
    async fn read_bytes(&self) -> Result<Vec<u8>, String>;
}

/// 磁盘文件
pub struct DiskFile {
    name: String,
    size: u64,
    path: PathBuf,
}

impl DiskFile {
    /// 打开磁盘文件并读取元数据
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref().to_path_buf();
        let meta = tokio::fs::metadata(&path)
            .await
            .map_err(|e| format!("读取文件元数据失败: {}", e))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("无效的文件名: {}", path.display()))?
            .to_string();
        Ok(Self {
            name,
            size: meta.len(),
            path,
        })
    }
}

#[async_trait]
impl FileSource for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn read_prefix(&self, len: usize) -> Result<Vec<u8>, String> {
        let mut file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| format!("打开文件失败: {}", e))?;
        let mut buf = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            let n = file
                .read(&mut buf[filled..])
                .await
                .map_err(|e| format!("读取文件失败: {}", e))?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        buf.truncate(filled);
        Ok(buf)
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, String> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| format!("读取文件失败: {}", e))
    }
}

/// 内存文件（测试固件，也用于剪贴板/拖拽传入的字节）
pub struct MemoryFile {
    name: String,
    data: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

#[async_trait]
impl FileSource for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    async fn read_prefix(&self, len: usize) -> Result<Vec<u8>, String> {
        Ok(self.data[..self.data.len().min(len)].to_vec())
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, String> {
        Ok(self.data.clone())
    }
}
