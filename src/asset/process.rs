//! The directory-scan / transform / hash pipeline.

use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::config::{ConfigError, ProcessorConfig};
use crate::logger::{ConsoleSink, DiagnosticSink};

use super::record::{AssetRecord, Content};
use super::scan::scan_directory;
use super::template::{TemplateAsset, TemplateData};
use super::{hash_fragment, integrity_string};

/// Caller-supplied transform: `(source path, is production) -> content`.
///
/// The transform is an opaque external call (typically a bundler or CSS
/// processor); its failures are wrapped in [`ProcessError::Transform`] with
/// the offending file path attached.
pub type TransformFn = Box<dyn Fn(&Path, bool) -> anyhow::Result<Content> + Send + Sync>;

// ============================================================================
// ProcessError
// ============================================================================

/// Errors raised during a processing run. Always surfaced to the caller,
/// never silently dropped.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The processor has no transform attached. Raised before any directory
    /// is scanned; distinct from the transform itself failing.
    #[error("no transform attached; attach one with `with_transform` before processing")]
    MissingTransform,

    #[error("failed to scan `{}`", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Field is deliberately not named `source`: anyhow::Error is the opaque
    // carrier for the external transform's failure and has no Error impl.
    #[error("transform failed for `{}`: {cause}", path.display())]
    Transform {
        path: PathBuf,
        cause: anyhow::Error,
    },

    /// A matched file has a name that is not valid UTF-8, so no lookup key
    /// can be derived for it.
    #[error("cannot derive a lookup key for `{}`", path.display())]
    InvalidName { path: PathBuf },
}

// ============================================================================
// AssetProcessor
// ============================================================================

/// Scans configured directories, transforms matching files, and computes
/// cache-busted destinations and integrity hashes.
///
/// Every processing run is a fresh, independent pass: records are rebuilt
/// fully, nothing is cached between calls.
pub struct AssetProcessor {
    config: ProcessorConfig,
    transform: Option<TransformFn>,
    sink: Box<dyn DiagnosticSink + Send + Sync>,
}

impl AssetProcessor {
    /// Build a processor from a configuration.
    ///
    /// Validation happens here, before any I/O: all configuration problems
    /// are reported together, and directory paths are sanitized against
    /// traversal.
    pub fn new(config: ProcessorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validate()?,
            transform: None,
            sink: Box::new(ConsoleSink),
        })
    }

    /// Attach the per-file transform.
    pub fn with_transform(mut self, transform: TransformFn) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Replace the diagnostic sink (defaults to [`ConsoleSink`]).
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink + Send + Sync>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process every matching file in every configured directory.
    ///
    /// Returns records in canonical order: directory order, then filesystem
    /// listing order within a directory. Transforms within one directory are
    /// dispatched in parallel; the order-preserving collect keeps the result
    /// canonical regardless of completion order.
    ///
    /// A single transform failure aborts the whole run; no partial result is
    /// returned. A directory with zero matches is not an error: the miss is
    /// reported through the diagnostic sink and the directory is skipped.
    pub fn process_directory(&self) -> Result<Vec<AssetRecord>, ProcessError> {
        let transform = self
            .transform
            .as_ref()
            .ok_or(ProcessError::MissingTransform)?;

        let mut records = Vec::new();
        for dir in self.config.directories() {
            let files = scan_directory(dir, &self.config.in_extension).map_err(|source| {
                ProcessError::Scan {
                    path: dir.clone(),
                    source,
                }
            })?;

            if files.is_empty() {
                self.sink.report(
                    "assets",
                    &format!(
                        "no .{} files in {}",
                        self.config.in_extension,
                        dir.display()
                    ),
                );
                continue;
            }

            let batch = files
                .par_iter()
                .map(|file| self.process_file(transform, file))
                .collect::<Result<Vec<_>, _>>()?;
            records.extend(batch);
        }
        Ok(records)
    }

    /// Transform one file and build its record.
    fn process_file(
        &self,
        transform: &TransformFn,
        file: &Path,
    ) -> Result<AssetRecord, ProcessError> {
        let basename = file
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ProcessError::InvalidName {
                path: file.to_path_buf(),
            })?
            .to_string();

        let content =
            transform(file, self.config.production).map_err(|cause| ProcessError::Transform {
                path: file.to_path_buf(),
                cause,
            })?;

        let index = format!("{basename}.{}", self.config.in_extension);

        let (destination, integrity) = if self.config.production {
            let fragment = hash_fragment(content.as_bytes());
            (
                self.config.prod_destination(&basename, &fragment),
                Some(integrity_string(content.as_bytes())),
            )
        } else {
            (self.config.dev_destination(&basename), None)
        };

        Ok(AssetRecord {
            index,
            source: file.to_path_buf(),
            destination,
            content,
            integrity,
        })
    }
}

impl TemplateAsset for AssetProcessor {
    fn data(&self) -> Result<TemplateData, ProcessError> {
        Ok(TemplateData::new(
            self.config.collection.clone(),
            self.process_directory()?,
        ))
    }

    /// Identity projection: the record's content is the emitted file body.
    fn render<'a>(&self, item: &'a AssetRecord) -> &'a Content {
        &item.content
    }
}

// ============================================================================
// Tests
// ============================================================================
