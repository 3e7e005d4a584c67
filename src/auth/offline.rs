//! 离线凭证存储
//!
//! 在本地缓存一条用户身份 + PIN 校验和，与网络无关。
//! 记录至多一条，新的开通操作静默覆盖旧记录；
//! 读到损坏的 JSON 一律当作"不存在"，绝不向上抛错。

use crate::models::{CachedOfflineUser, OfflineUserInfo, OfflineUserView, UserProfile};
use crate::storage::{KeyValueStore, OFFLINE_USER_KEY};

use super::pin::hash_pin;

/// 离线凭证存储服务
pub struct OfflineAuthStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> OfflineAuthStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 保存离线用户
    ///
    /// 计算 PIN 校验和并连同用户资料、时间戳、开关一起落盘。
    /// PIN 强度（长度 ≥ 4、二次确认）由调用方负责。
    pub fn save_offline_user(&self, user: &UserProfile, pin: &str) -> Result<(), String> {
        let record = CachedOfflineUser::new(user, hash_pin(pin));
        let content = serde_json::to_string(&record)
            .map_err(|e| format!("序列化离线用户失败: {}", e))?;
        self.store.set(OFFLINE_USER_KEY, &content)?;
        tracing::info!("[OfflineAuth] 离线凭证已保存: {}", record.email);
        Ok(())
    }

    /// 用 PIN 做离线登录验证
    ///
    /// 校验和匹配时返回脱敏后的用户视图（authMethod = "offline"），
    /// 记录缺失、JSON 损坏、校验和不匹配统一返回 None。
    pub fn verify_offline_pin(&self, pin: &str) -> Option<OfflineUserView> {
        let record = self.load_record()?;
        if record.pin != hash_pin(pin) {
            tracing::debug!("[OfflineAuth] PIN 校验和不匹配");
            return None;
        }
        Some(OfflineUserView {
            name: record.name,
            email: record.email,
            picture: record.picture,
            auth_method: "offline".to_string(),
        })
    }

    /// 是否存在离线凭证（只做存在性检查，不解码）
    pub fn has_offline_access(&self) -> bool {
        self.store.get(OFFLINE_USER_KEY).is_some()
    }

    /// 获取缓存的用户信息用于展示，不做任何 PIN 验证
    pub fn get_offline_user_info(&self) -> Option<OfflineUserInfo> {
        let record = self.load_record()?;
        Some(OfflineUserInfo {
            name: record.name,
            email: record.email,
            picture: record.picture,
        })
    }

    /// 无条件删除离线凭证
    pub fn remove_offline_access(&self) {
        self.store.remove(OFFLINE_USER_KEY);
        tracing::info!("[OfflineAuth] 离线凭证已删除");
    }

    /// 读取并解码记录，缺失或损坏返回 None
    fn load_record(&self) -> Option<CachedOfflineUser> {
        let content = self.store.get(OFFLINE_USER_KEY)?;
        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("[OfflineAuth] 离线凭证解析失败，按不存在处理: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn test_user() -> UserProfile {
        UserProfile {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            picture: Some("https://example.com/a.png".to_string()),
        }
    }

    #[test]
    fn test_save_then_verify() {
        let auth = OfflineAuthStore::new(MemoryKeyValueStore::new());
        auth.save_offline_user(&test_user(), "1234").unwrap();

        let view = auth.verify_offline_pin("1234").unwrap();
        assert_eq!(view.name, "Ada");
        assert_eq!(view.email, "ada@example.com");
        assert_eq!(view.auth_method, "offline");
    }

    #[test]
    fn test_wrong_pin_is_no_match() {
        let auth = OfflineAuthStore::new(MemoryKeyValueStore::new());
        auth.save_offline_user(&test_user(), "1234").unwrap();
        assert!(auth.verify_offline_pin("9999").is_none());
    }

    #[test]
    fn test_verify_without_record() {
        let auth = OfflineAuthStore::new(MemoryKeyValueStore::new());
        assert!(auth.verify_offline_pin("1234").is_none());
    }

    #[test]
    fn test_has_offline_access_lifecycle() {
        let auth = OfflineAuthStore::new(MemoryKeyValueStore::new());
        assert!(!auth.has_offline_access());

        auth.save_offline_user(&test_user(), "1234").unwrap();
        assert!(auth.has_offline_access());

        auth.remove_offline_access();
        assert!(!auth.has_offline_access());
    }

    #[test]
    fn test_new_enrollment_replaces_old() {
        let auth = OfflineAuthStore::new(MemoryKeyValueStore::new());
        auth.save_offline_user(&test_user(), "1234").unwrap();

        let other = UserProfile {
            name: "Brin".to_string(),
            email: "brin@example.com".to_string(),
            picture: None,
        };
        auth.save_offline_user(&other, "5678").unwrap();

        // 旧 PIN 失效，新 PIN 返回新用户
        assert!(auth.verify_offline_pin("1234").is_none());
        let view = auth.verify_offline_pin("5678").unwrap();
        assert_eq!(view.email, "brin@example.com");
    }

    #[test]
    fn test_get_info_without_pin() {
        let auth = OfflineAuthStore::new(MemoryKeyValueStore::new());
        auth.save_offline_user(&test_user(), "1234").unwrap();

        let info = auth.get_offline_user_info().unwrap();
        assert_eq!(info.name, "Ada");
        assert_eq!(info.picture.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_malformed_record_is_absent() {
        let store = MemoryKeyValueStore::new();
        store.set("offline_user", "{not json").unwrap();
        let auth = OfflineAuthStore::new(store);

        assert!(auth.verify_offline_pin("1234").is_none());
        assert!(auth.get_offline_user_info().is_none());
        // 存在性检查只看键，不看内容
        assert!(auth.has_offline_access());
    }

    #[test]
    fn test_stored_blob_matches_legacy_shape() {
        // 落盘的 JSON 必须保持旧版前端的 camelCase 字段名和校验和形式
        let store = std::sync::Arc::new(MemoryKeyValueStore::new());
        let auth = OfflineAuthStore::new(std::sync::Arc::clone(&store));
        auth.save_offline_user(&test_user(), "1234").unwrap();

        let raw = store.get("offline_user").unwrap();
        assert!(raw.contains("\"savedAt\""));
        assert!(raw.contains("\"offlineEnabled\":true"));
        assert!(raw.contains("\"pin\":\"1509442\""));
    }

    #[test]
    fn test_reads_blob_written_by_legacy_frontend() {
        // 旧版前端写入的 camelCase JSON 必须能直接读取
        let store = MemoryKeyValueStore::new();
        store
            .set(
                "offline_user",
                r#"{"name":"Ada","email":"ada@example.com","pin":"1509442","savedAt":"2025-11-02T10:00:00Z","offlineEnabled":true}"#,
            )
            .unwrap();
        let auth = OfflineAuthStore::new(store);

        let view = auth.verify_offline_pin("1234").unwrap();
        assert_eq!(view.name, "Ada");
        assert!(view.picture.is_none());
    }
}
