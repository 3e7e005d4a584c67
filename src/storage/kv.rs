//! 键值存储接口定义

/// 离线凭证记录的存储键
pub const OFFLINE_USER_KEY: &str = "offline_user";
/// 聊天历史列表的存储键
pub const CHAT_HISTORY_KEY: &str = "chat_history";
/// 当前登录用户缓存的存储键
pub const CURRENT_USER_KEY: &str = "user";

/// 单槽键值存储接口
///
/// 凭证存储和聊天历史都通过这个接口访问持久层，
/// 测试时可以注入内存实现。约定：
/// - `get` 返回 `None` 表示键不存在或不可读
/// - `set` 覆盖写入整个值
/// - `remove` 幂等，删除不存在的键不报错
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str);
}

// 允许多个服务共享同一个底层存储
impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
