//! 本地键值存储模块
//!
//! 对应浏览器端的 localStorage：每个逻辑键保存一个 JSON 文本块，
//! 没有 schema 版本号，读取方必须容忍键缺失和 JSON 损坏（当作不存在）。
//!
//! ## 存储键
//! - `offline_user`  离线凭证记录（至多一条）
//! - `chat_history`  聊天历史列表（新的在前）
//! - `user`          当前登录用户（含后端 token）

mod file_store;
mod kv;
mod memory_store;

pub use file_store::FileKeyValueStore;
pub use kv::{KeyValueStore, CHAT_HISTORY_KEY, CURRENT_USER_KEY, OFFLINE_USER_KEY};
pub use memory_store::MemoryKeyValueStore;
