//! The seam between the pipeline and the host templating layer.
//!
//! The host treats anything implementing [`TemplateAsset`] as if it were a
//! source template: `data()` produces the frontmatter-equivalent structure,
//! `render()` produces one output file body per record. The host paginates
//! over the records, materializing each at its destination path.

use super::process::ProcessError;
use super::record::{AssetRecord, Content};
use std::path::Path;

/// Pagination directive: one output page per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Records per page; always 1 for assets.
    pub size: usize,
    /// Name the templating layer binds each record to.
    pub alias: String,
    /// Whether paginated pages join the tagged collections.
    pub add_all_to_collections: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            size: 1,
            alias: "item".to_string(),
            add_all_to_collections: true,
        }
    }
}

/// Everything the host templating layer needs to materialize one output
/// file per record: the collection tag, the pagination directive, and the
/// records themselves. Per-record permalink, lookup key, and integrity are
/// exposed through the accessors.
#[derive(Debug, Clone)]
pub struct TemplateData {
    /// Collection every record is tagged with.
    pub collection: String,
    pub pagination: Pagination,
    /// Processed records in canonical order.
    pub items: Vec<AssetRecord>,
}

impl TemplateData {
    pub fn new(collection: String, items: Vec<AssetRecord>) -> Self {
        Self {
            collection,
            pagination: Pagination::default(),
            items,
        }
    }

    /// Permalink of a record: its destination path.
    pub fn permalink(item: &AssetRecord) -> &Path {
        &item.destination
    }

    /// Lookup key of a record: its original filename.
    pub fn key(item: &AssetRecord) -> &str {
        &item.index
    }

    /// Integrity hash of a record, when built in production.
    pub fn integrity(item: &AssetRecord) -> Option<&str> {
        item.integrity.as_deref()
    }
}

/// A non-file-backed unit the host templating layer treats as a source
/// template.
pub trait TemplateAsset {
    /// Run the pipeline and describe the resulting output pages.
    fn data(&self) -> Result<TemplateData, ProcessError>;

    /// Body of the output file for one record.
    fn render<'a>(&self, item: &'a AssetRecord) -> &'a Content;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(index: &str, integrity: Option<&str>) -> AssetRecord {
        AssetRecord {
            index: index.to_string(),
            source: PathBuf::from("assets").join(index),
            destination: PathBuf::from("public").join(index),
            content: Content::from("body {}"),
            integrity: integrity.map(String::from),
        }
    }

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.size, 1);
        assert_eq!(pagination.alias, "item");
        assert!(pagination.add_all_to_collections);
    }

    #[test]
    fn test_accessors() {
        let data = TemplateData::new(
            "_styles".to_string(),
            vec![record("main.css", Some("sha512-ABC"))],
        );
        let item = &data.items[0];

        assert_eq!(TemplateData::key(item), "main.css");
        assert_eq!(TemplateData::permalink(item), Path::new("public/main.css"));
        assert_eq!(TemplateData::integrity(item), Some("sha512-ABC"));
        assert_eq!(
            TemplateData::integrity(&record("dev.css", None)),
            None
        );
    }
}
