//! In-memory cache store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::snapshot::Snapshot;
use crate::store::{CacheResult, CacheStore};

/// In-memory `CacheStore` used by tests and single-process embeddings.
#[derive(Default)]
pub struct MemoryStore {
    generations: RwLock<HashMap<String, HashMap<String, Snapshot>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a generation, or `None` if it does not exist.
    pub async fn len(&self, generation: &str) -> Option<usize> {
        self.generations
            .read()
            .await
            .get(generation)
            .map(HashMap::len)
    }

    /// Whether a generation exists.
    pub async fn contains_generation(&self, generation: &str) -> bool {
        self.generations.read().await.contains_key(generation)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn open(&self, generation: &str) -> CacheResult<()> {
        self.generations
            .write()
            .await
            .entry(generation.to_string())
            .or_default();
        Ok(())
    }

    async fn get(&self, generation: &str, key: &str) -> CacheResult<Option<Snapshot>> {
        Ok(self
            .generations
            .read()
            .await
            .get(generation)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn put(&self, generation: &str, key: &str, snapshot: Snapshot) -> CacheResult<()> {
        self.generations
            .write()
            .await
            .entry(generation.to_string())
            .or_default()
            .insert(key.to_string(), snapshot);
        Ok(())
    }

    async fn put_many(
        &self,
        generation: &str,
        entries: Vec<(String, Snapshot)>,
    ) -> CacheResult<()> {
        let mut generations = self.generations.write().await;
        let store = generations.entry(generation.to_string()).or_default();
        for (key, snapshot) in entries {
            store.insert(key, snapshot);
        }
        Ok(())
    }

    async fn names(&self) -> CacheResult<Vec<String>> {
        Ok(self.generations.read().await.keys().cloned().collect())
    }

    async fn delete(&self, generation: &str) -> CacheResult<bool> {
        Ok(self.generations.write().await.remove(generation).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use worker_core::Response;

    fn snapshot(body: &str) -> Snapshot {
        Snapshot::capture(&Response::new(StatusCode::OK).with_body(body.as_bytes().to_vec()))
    }

    #[tokio::test]
    async fn test_open_creates_empty_generation() {
        let store = MemoryStore::new();
        store.open("v1").await.unwrap();

        assert_eq!(store.len("v1").await, Some(0));
        assert_eq!(store.names().await.unwrap(), vec!["v1".to_string()]);
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let store = MemoryStore::new();
        store.put("v1", "GET /index.html", snapshot("shell")).await.unwrap();

        let found = store.get("v1", "GET /index.html").await.unwrap().unwrap();
        assert_eq!(found.body, b"shell");
        assert!(store.get("v1", "GET /missing").await.unwrap().is_none());
        assert!(store.get("v2", "GET /index.html").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put("v1", "GET /", snapshot("old")).await.unwrap();
        store.put("v1", "GET /", snapshot("new")).await.unwrap();

        let found = store.get("v1", "GET /").await.unwrap().unwrap();
        assert_eq!(found.body, b"new");
        assert_eq!(store.len("v1").await, Some(1));
    }

    #[tokio::test]
    async fn test_put_many_creates_generation() {
        let store = MemoryStore::new();
        store
            .put_many(
                "v1",
                vec![
                    ("GET /".to_string(), snapshot("shell")),
                    ("GET /manifest.json".to_string(), snapshot("manifest")),
                ],
            )
            .await
            .unwrap();

        assert_eq!(store.len("v1").await, Some(2));
    }

    #[tokio::test]
    async fn test_delete_generation() {
        let store = MemoryStore::new();
        store.put("v-old", "GET /", snapshot("x")).await.unwrap();

        assert!(store.delete("v-old").await.unwrap());
        assert!(!store.delete("v-old").await.unwrap());
        assert!(!store.contains_generation("v-old").await);
    }
}
