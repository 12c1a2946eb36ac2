mod error;
mod key;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use filesystem::FilesystemDocumentStore;
pub use key::{FileKey, StoredDocument, sanitize_original_name};
pub use traits::{BoxReader, DocumentStore};
