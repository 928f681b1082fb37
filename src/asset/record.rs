//! Processed-asset records.

use std::path::PathBuf;

// ============================================================================
// Content
// ============================================================================

/// Output of a transform: text or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    /// Bytes of the content, regardless of variant. Integrity hashes and
    /// filename fragments are computed over these bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Content {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

// ============================================================================
// AssetRecord
// ============================================================================

/// One processed source file.
///
/// Records are rebuilt fully on every processing run; nothing is persisted
/// between builds. `index` values are unique within one run unless the same
/// basename appears in multiple configured directories, in which case all
/// records are kept in directory order (lookup finds the first).
#[derive(Debug, Clone)]
pub struct AssetRecord {
    /// Original filename (basename + input extension); the lookup key.
    pub index: String,

    /// Resolved source path.
    pub source: PathBuf,

    /// Output path. Production builds insert a 10-character uppercase hash
    /// fragment before the output extension; development builds don't.
    pub destination: PathBuf,

    /// Transform output, emitted verbatim as the file body.
    pub content: Content,

    /// Subresource-integrity string, present only in production builds.
    pub integrity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_bytes() {
        let text = Content::from("body {}");
        assert_eq!(text.as_bytes(), b"body {}");

        let binary = Content::from(vec![0u8, 159, 146]);
        assert_eq!(binary.as_bytes(), &[0, 159, 146]);
        assert_eq!(binary.len(), 3);
        assert!(!binary.is_empty());
    }

    #[test]
    fn test_empty_content() {
        assert!(Content::from("").is_empty());
        assert!(Content::from(Vec::new()).is_empty());
    }
}
