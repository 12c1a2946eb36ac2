use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StorageError;

/// Length of a hyphenated UUID, the id prefix of every generated key.
const ID_PREFIX_LEN: usize = 36;

/// A validated on-disk identifier for an uploaded document.
///
/// Generated keys have the shape `{uuid-v4}_{sanitized_original_name}`.
/// Parsing rejects anything that could escape the upload directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileKey(String);

impl FileKey {
    /// Validate a raw key string, e.g. one taken from a request path.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        if raw.is_empty() {
            return Err(StorageError::InvalidKey("key cannot be empty".into()));
        }
        if raw.contains('\0') {
            return Err(StorageError::InvalidKey(
                "key must not contain null bytes".into(),
            ));
        }
        if raw.chars().any(|c| c.is_ascii_control()) {
            return Err(StorageError::InvalidKey(
                "key must not contain control characters".into(),
            ));
        }
        if raw.contains('/') || raw.contains('\\') {
            return Err(StorageError::InvalidKey(
                "key must not contain path separators".into(),
            ));
        }
        if raw == ".." {
            return Err(StorageError::InvalidKey(
                "key must not be a traversal pattern".into(),
            ));
        }
        if raw.starts_with('.') {
            return Err(StorageError::InvalidKey(
                "key must not start with '.'".into(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Mint a fresh key for an already-sanitized original name.
    pub(crate) fn generate(sanitized_name: &str) -> Self {
        Self(format!("{}_{sanitized_name}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The human-facing name: the key with its id prefix stripped.
    ///
    /// Keys without the `{36-char-id}_` shape are shown unchanged, so
    /// files dropped into the upload directory by hand still list.
    pub fn display_name(&self) -> &str {
        match self.0.split_once('_') {
            Some((prefix, rest)) if prefix.len() == ID_PREFIX_LEN && !rest.is_empty() => rest,
            _ => &self.0,
        }
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata for one stored document.
#[derive(Debug, Clone, Serialize)]
pub struct StoredDocument {
    pub key: FileKey,
    pub display_name: String,
    pub size: u64,
    pub modified_at: DateTime<Utc>,
}

/// Reduce an arbitrary client-supplied filename to a safe flat name.
///
/// Directory components are dropped, whitespace collapses to `_`, and
/// anything outside `[A-Za-z0-9._-]` is removed. Leading dots are
/// stripped so a sanitized name can never be hidden or a traversal.
pub fn sanitize_original_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim();

    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            out.push(c);
        } else if c.is_whitespace() {
            out.push('_');
        }
    }

    let out = out.trim_start_matches(['.', '_']).to_string();
    if out.is_empty() {
        "document.pdf".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_generated_keys() {
        let key = FileKey::generate("report.pdf");
        assert!(FileKey::parse(key.as_str()).is_ok());
    }

    #[test]
    fn parse_rejects_traversal_and_separators() {
        assert!(FileKey::parse("..").is_err());
        assert!(FileKey::parse("../etc/passwd").is_err());
        assert!(FileKey::parse("a/b.pdf").is_err());
        assert!(FileKey::parse("a\\b.pdf").is_err());
        assert!(FileKey::parse(".hidden.pdf").is_err());
        assert!(FileKey::parse("").is_err());
        assert!(FileKey::parse("a\0b.pdf").is_err());
        assert!(FileKey::parse("a\r\nb.pdf").is_err());
    }

    #[test]
    fn display_name_strips_id_prefix() {
        let key = FileKey::parse("550e8400-e29b-41d4-a716-446655440000_report.pdf").unwrap();
        assert_eq!(key.display_name(), "report.pdf");
    }

    #[test]
    fn display_name_preserves_underscores_in_name() {
        let key = FileKey::parse("550e8400-e29b-41d4-a716-446655440000_my_report.pdf").unwrap();
        assert_eq!(key.display_name(), "my_report.pdf");
    }

    #[test]
    fn display_name_keeps_unprefixed_names() {
        let key = FileKey::parse("plain.pdf").unwrap();
        assert_eq!(key.display_name(), "plain.pdf");

        // Underscore present but the prefix is not id-shaped.
        let key = FileKey::parse("short_name.pdf").unwrap();
        assert_eq!(key.display_name(), "short_name.pdf");
    }

    #[test]
    fn sanitize_drops_directory_components() {
        assert_eq!(sanitize_original_name("/tmp/evil/report.pdf"), "report.pdf");
        assert_eq!(sanitize_original_name("..\\..\\report.pdf"), "report.pdf");
    }

    #[test]
    fn sanitize_maps_whitespace_and_strips_unsafe() {
        assert_eq!(
            sanitize_original_name("annual report (final).pdf"),
            "annual_report_final.pdf"
        );
        assert_eq!(sanitize_original_name("café menu.pdf"), "caf_menu.pdf");
    }

    #[test]
    fn sanitize_never_returns_hidden_or_empty() {
        assert_eq!(sanitize_original_name(".._sneaky.pdf"), "sneaky.pdf");
        assert_eq!(sanitize_original_name("¡¡¡"), "document.pdf");
        assert_eq!(sanitize_original_name(""), "document.pdf");
    }
}
