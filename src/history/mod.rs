//! 聊天历史存储
//!
//! `chat_history` 键下保存一个只追加的列表，新条目放最前面。
//! 损坏的 JSON 按空列表处理，不影响后续写入。

use crate::models::ChatHistoryEntry;
use crate::storage::{KeyValueStore, CHAT_HISTORY_KEY};

/// 聊天历史存储服务
pub struct ChatHistoryStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ChatHistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 追加一条历史记录（放在列表最前面）
    pub fn add(&self, entry: ChatHistoryEntry) -> Result<(), String> {
        let mut entries = self.list();
        entries.insert(0, entry);
        let content = serde_json::to_string(&entries)
            .map_err(|e| format!("序列化聊天历史失败: {}", e))?;
        self.store.set(CHAT_HISTORY_KEY, &content)
    }

    /// 读取全部历史（新的在前），缺失或损坏返回空列表
    pub fn list(&self) -> Vec<ChatHistoryEntry> {
        let Some(content) = self.store.get(CHAT_HISTORY_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("[ChatHistory] 历史解析失败，按空列表处理: {}", e);
                Vec::new()
            }
        }
    }

    /// 清空历史
    pub fn clear(&self) {
        self.store.remove(CHAT_HISTORY_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SummarySettings;
    use crate::storage::MemoryKeyValueStore;

    fn entry(prompt: &str) -> ChatHistoryEntry {
        ChatHistoryEntry::new(
            prompt.to_string(),
            vec!["a.pdf".to_string()],
            SummarySettings::default(),
        )
    }

    #[test]
    fn test_newest_first() {
        let history = ChatHistoryStore::new(MemoryKeyValueStore::new());
        history.add(entry("first")).unwrap();
        history.add(entry("second")).unwrap();

        let entries = history.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].prompt, "second");
        assert_eq!(entries[1].prompt, "first");
    }

    #[test]
    fn test_empty_and_malformed() {
        let store = MemoryKeyValueStore::new();
        store.set("chat_history", "not json").unwrap();
        let history = ChatHistoryStore::new(store);
        assert!(history.list().is_empty());

        // 损坏的数据不阻止新写入
        history.add(entry("fresh")).unwrap();
        assert_eq!(history.list().len(), 1);
    }

    #[test]
    fn test_clear() {
        let history = ChatHistoryStore::new(MemoryKeyValueStore::new());
        history.add(entry("one")).unwrap();
        history.clear();
        assert!(history.list().is_empty());
    }
}
