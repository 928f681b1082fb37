//! Processor configuration: the per-asset-kind settings surface,
//! batch validation diagnostics, and path sanitization.
//!
//! Configuration is validated in one pass: every problem is collected into
//! [`ConfigDiagnostics`] and reported together, so a config with three
//! mistakes surfaces three errors on the first run, not one per run.
//!
//! # Example
//!
//! ```toml
//! collection = "_styles"
//! inDirectory = ["_assets/css", "vendor/css"]
//! inExtension = "css"
//! outDirectory = "_assets/css"
//! outExtension = "css"
//! production = true
//! ```

mod error;
pub mod path_guard;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// OneOrMany
// ============================================================================

/// A single directory or a list of directories.
///
/// The settings surface accepts both `inDirectory = "assets"` and
/// `inDirectory = ["assets", "vendor"]`; a single string is equivalent to a
/// one-element list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany {
    /// Single path string.
    One(PathBuf),
    /// List of paths.
    Many(Vec<PathBuf>),
}

impl OneOrMany {
    /// View as a slice regardless of variant.
    pub fn as_slice(&self) -> &[PathBuf] {
        match self {
            Self::One(p) => std::slice::from_ref(p),
            Self::Many(v) => v,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(v) => v.is_empty(),
        }
    }
}

impl Default for OneOrMany {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<&str> for OneOrMany {
    fn from(path: &str) -> Self {
        Self::One(PathBuf::from(path))
    }
}

impl From<Vec<PathBuf>> for OneOrMany {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self::Many(paths)
    }
}

// ============================================================================
// ProcessorConfig
// ============================================================================

/// Configuration for one [`AssetProcessor`](crate::asset::AssetProcessor).
///
/// Field names follow the camelCase settings surface of the host build tool.
/// The transform itself is not part of this struct; it is attached when the
/// processor is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessorConfig {
    /// Collection every processed record is tagged with.
    pub collection: String,

    /// Source directories scanned in order.
    pub in_directory: OneOrMany,

    /// File extension to process, without the leading dot.
    pub in_extension: String,

    /// File extension of the output files, without the leading dot.
    pub out_extension: String,

    /// Directory destination paths are rooted at.
    pub out_directory: PathBuf,

    /// Production builds get cache-busted filenames and integrity hashes.
    pub production: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            collection: "_assets".to_string(),
            in_directory: OneOrMany::default(),
            in_extension: String::new(),
            out_extension: String::new(),
            out_directory: PathBuf::new(),
            production: false,
        }
    }
}

impl ProcessorConfig {
    /// Validate the configuration and return a copy with all directory
    /// paths sanitized.
    ///
    /// Every problem is collected; the returned error lists all of them.
    /// No I/O happens here, so an invalid path fails before any directory
    /// is touched.
    pub fn validate(&self) -> Result<Self, ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        // Required keys, reported together.
        let mut missing = Vec::new();
        if self.in_directory.is_empty() {
            missing.push("inDirectory");
        }
        if self.in_extension.is_empty() {
            missing.push("inExtension");
        }
        if self.out_directory.as_os_str().is_empty() {
            missing.push("outDirectory");
        }
        if self.out_extension.is_empty() {
            missing.push("outExtension");
        }
        if !missing.is_empty() {
            diag.error(
                "config",
                format!(
                    "missing required configuration parameters: {}",
                    missing.join(", ")
                ),
            );
        }

        if self.collection.is_empty() {
            diag.error("collection", "collection name cannot be empty");
        }

        for (field, ext) in [
            ("inExtension", &self.in_extension),
            ("outExtension", &self.out_extension),
        ] {
            if ext.starts_with('.') {
                diag.error(
                    field,
                    format!("extension '{ext}' must not include the leading dot"),
                );
            }
        }

        let mut validated = self.clone();

        let mut dirs = Vec::with_capacity(self.in_directory.as_slice().len());
        for dir in self.in_directory.as_slice() {
            match path_guard::sanitize(dir, "input directory") {
                Ok(p) => dirs.push(p),
                Err(e) => diag.error("inDirectory", e.to_string()),
            }
        }
        validated.in_directory = OneOrMany::Many(dirs);

        if !self.out_directory.as_os_str().is_empty() {
            match path_guard::sanitize(&self.out_directory, "output directory") {
                Ok(p) => validated.out_directory = p,
                Err(e) => diag.error("outDirectory", e.to_string()),
            }
        }

        diag.into_result().map_err(ConfigError::Diagnostics)?;
        Ok(validated)
    }

    /// Sanitized source directories, in configured order.
    pub fn directories(&self) -> &[PathBuf] {
        self.in_directory.as_slice()
    }

    /// Output path for a basename in a development build.
    pub fn dev_destination(&self, basename: &str) -> PathBuf {
        self.out_directory
            .join(format!("{basename}.{}", self.out_extension))
    }

    /// Output path for a basename and hash fragment in a production build.
    pub fn prod_destination(&self, basename: &str, fragment: &str) -> PathBuf {
        self.out_directory
            .join(format!("{basename}-{fragment}.{}", self.out_extension))
    }
}

// ============================================================================
// Tests
// ============================================================================
