use std::path::Path;

use common::storage::{BoxReader, DocumentStore, StorageError, StoredDocument};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// Why an upload was rejected. The `Display` text is user-facing and
/// shown as a flash message on the upload screen.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file selected")]
    Empty,
    #[error("Invalid file type. Please upload a PDF file.")]
    UnsupportedType,
    #[error("File is too large. The maximum upload size is {limit} bytes.")]
    TooLarge { limit: u64 },
    #[error("Error uploading file: {0}")]
    Storage(String),
}

impl From<StorageError> for UploadError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SizeLimitExceeded { limit, .. } => UploadError::TooLarge { limit },
            other => UploadError::Storage(other.to_string()),
        }
    }
}

/// Case-insensitive extension check against [`ALLOWED_EXTENSIONS`].
pub fn allowed_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Validate and commit one buffered upload.
pub async fn process_upload(
    store: &dyn DocumentStore,
    file_name: &str,
    data: &[u8],
) -> Result<StoredDocument, UploadError> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(UploadError::Empty);
    }
    if !allowed_file(file_name) {
        return Err(UploadError::UnsupportedType);
    }
    Ok(store.store(file_name, data).await?)
}

/// Stream a multipart field through a temp file into the store.
///
/// The size limit is enforced chunk by chunk so an oversized upload is
/// cut off mid-transfer instead of after full buffering. The temp file
/// is removed on every exit path.
pub async fn stream_field_to_store(
    mut field: axum::extract::multipart::Field<'_>,
    file_name: &str,
    store: &dyn DocumentStore,
    max_size: u64,
) -> Result<StoredDocument, UploadError> {
    let temp_path = std::env::temp_dir().join(format!("pdfviewer-upload-{}", Uuid::new_v4()));

    let result = async {
        let mut temp_file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| UploadError::Storage(format!("failed to create temp file: {e}")))?;

        let mut total_size: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| UploadError::Storage(format!("upload read error: {e}")))?
        {
            total_size += chunk.len() as u64;
            if total_size > max_size {
                return Err(UploadError::TooLarge { limit: max_size });
            }
            temp_file
                .write_all(&chunk)
                .await
                .map_err(|e| UploadError::Storage(format!("temp file write failed: {e}")))?;
        }

        if total_size == 0 {
            return Err(UploadError::Empty);
        }

        temp_file
            .flush()
            .await
            .map_err(|e| UploadError::Storage(format!("temp file flush failed: {e}")))?;
        drop(temp_file);

        let file = tokio::fs::File::open(&temp_path)
            .await
            .map_err(|e| UploadError::Storage(format!("failed to reopen temp file: {e}")))?;
        let reader: BoxReader = Box::new(file);
        Ok(store.store_stream(file_name, reader).await?)
    }
    .await;

    // Best effort.
    let _ = tokio::fs::remove_file(&temp_path).await;

    result
}
