use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;

/// An object read from the store, consumed within a single request.
#[derive(Debug, Clone)]
pub struct FetchedObject {
    /// Raw object bytes
    pub data: Bytes,

    /// Content type declared on the object (empty if none was stored)
    pub content_type: String,
}

impl FetchedObject {
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Size of the object in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Trait for reading whole objects from a bucket-like store.
///
/// Implementations must be thread-safe; a single instance is shared by all
/// in-flight requests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the object stored under `key`.
    ///
    /// Returns [`StoreError::NotFound`] when the key does not exist and
    /// [`StoreError::S3`] or [`StoreError::Connection`] for any other fault.
    async fn fetch(&self, key: &str) -> Result<FetchedObject, StoreError>;

    /// Name of the bucket or container objects are read from.
    fn bucket(&self) -> &str;
}
