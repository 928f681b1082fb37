//! Asset processing: scanning, transforming, hashing, destination mapping.

mod integrity;
mod process;
mod record;
mod scan;
mod template;

// Types
pub use record::{AssetRecord, Content};

// Scanning (pure functions)
pub use scan::{VIRTUAL_TEMPLATE_SUFFIX, is_virtual_template, scan_directory};

// Integrity hashing
pub use integrity::{digest_base64, hash_fragment, integrity_string};

// Processing
pub use process::{AssetProcessor, ProcessError, TransformFn};

// Host templating seam
pub use template::{Pagination, TemplateAsset, TemplateData};
