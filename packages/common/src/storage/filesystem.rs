use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

use super::error::StorageError;
use super::key::{FileKey, StoredDocument, sanitize_original_name};
use super::traits::{BoxReader, DocumentStore};

/// Filesystem-backed document store.
///
/// Documents live in a flat directory as `{uuid}_{sanitized_name}`;
/// the directory listing plus mtime is the only index. Writes go
/// through `{root}/.tmp` and are renamed into place.
pub struct FilesystemDocumentStore {
    root: PathBuf,
    max_size: u64,
}

impl FilesystemDocumentStore {
    /// Create a new store rooted at `root`, creating directories as needed.
    pub async fn new(root: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self { root, max_size })
    }

    fn document_path(&self, key: &FileKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.root
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl DocumentStore for FilesystemDocumentStore {
    async fn store_stream(
        &self,
        original_name: &str,
        mut reader: BoxReader,
    ) -> Result<StoredDocument, StorageError> {
        let sanitized = sanitize_original_name(original_name);
        let key = FileKey::generate(&sanitized);
        let temp_path = self.temp_path();
        let final_path = self.document_path(&key);

        let result = async {
            let mut temp_file = fs::File::create(&temp_path).await?;
            let mut total_bytes: u64 = 0;
            let mut buf = vec![0u8; 64 * 1024];

            loop {
                let n = reader.read(&mut buf).await?;
                if n == 0 {
                    break;
                }

                total_bytes += n as u64;
                if total_bytes > self.max_size {
                    return Err(StorageError::SizeLimitExceeded {
                        actual: total_bytes,
                        limit: self.max_size,
                    });
                }

                temp_file.write_all(&buf[..n]).await?;
            }

            temp_file.flush().await?;
            drop(temp_file);

            fs::rename(&temp_path, &final_path).await?;
            Ok(total_bytes)
        }
        .await;

        let size = match result {
            Ok(size) => size,
            Err(e) => {
                let _ = fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        let modified_at = fs::metadata(&final_path)
            .await
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        tracing::debug!(key = %key, size, "stored document");

        Ok(StoredDocument {
            display_name: key.display_name().to_string(),
            key,
            size,
            modified_at,
        })
    }

    async fn open(&self, key: &FileKey) -> Result<BoxReader, StorageError> {
        let path = self.document_path(key);
        match fs::File::open(&path).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.as_str().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &FileKey) -> Result<bool, StorageError> {
        let path = self.document_path(key);
        Ok(fs::try_exists(&path).await?)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<StoredDocument>, StorageError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut docs = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.to_ascii_lowercase().ends_with(".pdf") {
                continue;
            }
            let Ok(key) = FileKey::parse(&name) else {
                continue;
            };
            let Ok(meta) = entry.metadata().await else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }

            let modified_at = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            docs.push(StoredDocument {
                display_name: key.display_name().to_string(),
                key,
                size: meta.len(),
                modified_at,
            });
        }

        docs.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        docs.truncate(limit);
        Ok(docs)
    }
}
