use async_trait::async_trait;

use super::error::StorageError;

/// Bucket/key-addressed object storage.
///
/// The only caller that writes through this trait is photo ingestion; its
/// failure policy (log and continue) lives in the handler, not here.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object under `bucket`/`key`, replacing any existing object.
    async fn put(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Retrieve all bytes of an object.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, bucket: &str, key: &str) -> Result<bool, StorageError>;
}
