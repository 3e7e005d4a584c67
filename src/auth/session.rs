//! 当前登录用户缓存
//!
//! 对应 `user` 存储键：在线登录成功后保存 id / token，
//! API 客户端提交摘要请求时从这里取 user_id。

use crate::models::CurrentUser;
use crate::storage::{KeyValueStore, CURRENT_USER_KEY};

/// 当前登录用户存储
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 保存当前用户
    pub fn save(&self, user: &CurrentUser) -> Result<(), String> {
        let content =
            serde_json::to_string(user).map_err(|e| format!("序列化当前用户失败: {}", e))?;
        self.store.set(CURRENT_USER_KEY, &content)
    }

    /// 读取当前用户，缺失或损坏返回 None
    pub fn load(&self) -> Option<CurrentUser> {
        let content = self.store.get(CURRENT_USER_KEY)?;
        match serde_json::from_str(&content) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("[Session] 当前用户解析失败，按未登录处理: {}", e);
                None
            }
        }
    }

    /// 当前用户 ID（随摘要请求提交）
    pub fn user_id(&self) -> Option<i64> {
        self.load().and_then(|u| u.id)
    }

    /// 当前 token
    pub fn auth_token(&self) -> Option<String> {
        self.load().and_then(|u| u.token)
    }

    /// 退出登录
    pub fn clear(&self) {
        self.store.remove(CURRENT_USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn test_save_and_load() {
        let session = SessionStore::new(MemoryKeyValueStore::new());
        let user = CurrentUser {
            id: Some(7),
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            picture: None,
            token: Some("jwt-token".to_string()),
        };
        session.save(&user).unwrap();

        assert_eq!(session.user_id(), Some(7));
        assert_eq!(session.auth_token(), Some("jwt-token".to_string()));
    }

    #[test]
    fn test_missing_and_malformed() {
        let store = MemoryKeyValueStore::new();
        let session = SessionStore::new(store);
        assert!(session.load().is_none());
        assert!(session.user_id().is_none());

        session.store.set("user", "garbage").unwrap();
        assert!(session.load().is_none());
    }

    #[test]
    fn test_clear() {
        let session = SessionStore::new(MemoryKeyValueStore::new());
        session.save(&CurrentUser::default()).unwrap();
        session.clear();
        assert!(session.load().is_none());
    }
}
