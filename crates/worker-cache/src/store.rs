//! The persistent cache store seam.

use async_trait::async_trait;

use crate::snapshot::Snapshot;

/// Result type for cache store operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache store errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Backend storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Failed to serialize/deserialize a snapshot.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistent key-value store addressable by cache generation name.
///
/// Keys are request identities (method + URL). Opening a generation creates
/// it if absent; deleting a generation drops every entry in it. Same-key
/// writes from concurrent events race and last-write-wins is acceptable.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Open a generation, creating it if it does not exist.
    async fn open(&self, generation: &str) -> CacheResult<()>;

    /// Look up a snapshot by request identity.
    async fn get(&self, generation: &str, key: &str) -> CacheResult<Option<Snapshot>>;

    /// Insert or overwrite a snapshot.
    async fn put(&self, generation: &str, key: &str, snapshot: Snapshot) -> CacheResult<()>;

    /// Bulk-insert snapshots, creating the generation if absent.
    async fn put_many(
        &self,
        generation: &str,
        entries: Vec<(String, Snapshot)>,
    ) -> CacheResult<()>;

    /// Names of all existing generations.
    async fn names(&self) -> CacheResult<Vec<String>>;

    /// Delete a whole generation. Returns whether it existed.
    async fn delete(&self, generation: &str) -> CacheResult<bool>;
}
