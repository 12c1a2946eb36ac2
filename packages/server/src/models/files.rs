use common::storage::StoredDocument;
use serde::Serialize;

/// Template view of one recently uploaded file.
#[derive(Debug, Serialize)]
pub struct RecentFileView {
    /// The full stored key, used to build viewer links.
    pub name: String,
    pub display_name: String,
    pub date: String,
}

impl From<&StoredDocument> for RecentFileView {
    fn from(doc: &StoredDocument) -> Self {
        Self {
            name: doc.key.as_str().to_string(),
            display_name: doc.display_name.clone(),
            date: doc.modified_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}
