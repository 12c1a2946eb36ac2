pub mod storage;

pub use storage::{DocumentStore, FileKey, FilesystemDocumentStore, StorageError, StoredDocument};
