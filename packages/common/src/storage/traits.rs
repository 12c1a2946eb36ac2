use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::key::{FileKey, StoredDocument};

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Durable storage for uploaded documents, keyed by generated file keys.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a document and return its metadata.
    ///
    /// The original name is sanitized and combined with a fresh unique id,
    /// so two uploads of the same name never collide.
    async fn store(
        &self,
        original_name: &str,
        data: &[u8],
    ) -> Result<StoredDocument, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.store_stream(original_name, reader).await
    }

    /// Store a document from an async reader.
    ///
    /// The size limit is enforced while reading; an oversized stream is
    /// aborted without leaving a partial file behind.
    async fn store_stream(
        &self,
        original_name: &str,
        reader: BoxReader,
    ) -> Result<StoredDocument, StorageError>;

    /// Retrieve all bytes of a stored document.
    async fn read(&self, key: &FileKey) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.open(key).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Open a stored document as a streaming async reader.
    async fn open(&self, key: &FileKey) -> Result<BoxReader, StorageError>;

    /// Check whether a document exists under the given key.
    async fn exists(&self, key: &FileKey) -> Result<bool, StorageError>;

    /// List up to `limit` documents, most recently modified first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<StoredDocument>, StorageError>;
}
