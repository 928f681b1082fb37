//! Assetforge - an asset processing and linking pipeline for static-site builds.
//!
//! The crate discovers files of a configured extension in one or more source
//! directories, runs each through a caller-supplied transform, content-hashes
//! the output for cache busting in production builds, and exposes the results
//! as an ordered collection of [`asset::AssetRecord`]s. Templates consume that
//! collection through the [`link`] helpers, which emit `<link>`/`<script>`
//! tags with subresource-integrity attributes.
//!
//! The host build tool talks to the crate through two seams:
//! - [`plugin::PluginHost`], where shortcodes, virtual templates, and
//!   collection filters are registered;
//! - [`asset::TemplateAsset`], the `data()`/`render()` contract a virtual
//!   template must satisfy.

pub mod asset;
pub mod config;
pub mod link;
pub mod logger;
pub mod plugin;

pub use asset::{
    AssetProcessor, AssetRecord, Content, ProcessError, TemplateAsset, TemplateData, TransformFn,
};
pub use config::{ConfigError, OneOrMany, ProcessorConfig};
pub use link::{CollectionItem, LinkError, LinkOptions, asset_link, script_link};
pub use logger::{ConsoleSink, DiagnosticSink, NullSink};
pub use plugin::{PluginHost, PluginOptions, TransformKind, register};
