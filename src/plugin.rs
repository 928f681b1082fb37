//! Host-framework plugin registration.
//!
//! The host build tool is an external collaborator; the crate reaches it
//! through [`PluginHost`]. Registration wires up three things:
//! - the `assetLink`/`scriptLink` shortcodes,
//! - one [`AssetProcessor`] per enabled asset kind, registered as a virtual
//!   template,
//! - a collection filter per enabled kind, selecting the items tagged with
//!   that kind's collection name.
//!
//! Built-in transforms are selected through [`TransformKind`], a static
//! registry mapping a configuration value to a concrete constructor.
//! Configuration strings are never evaluated as code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::asset::{AssetProcessor, Content, TemplateAsset, TransformFn};
use crate::config::{ConfigError, OneOrMany, ProcessorConfig};
use crate::link::{CollectionItem, LinkError, LinkOptions, asset_link, script_link};
use crate::logger::ConsoleSink;

// ============================================================================
// Host Contract
// ============================================================================

/// A registered shortcode: `(collection, key, attributes, options)`.
pub type Shortcode = Box<
    dyn Fn(
            Option<&[CollectionItem]>,
            &str,
            &[(&str, &str)],
            &LinkOptions,
        ) -> Result<String, LinkError>
        + Send
        + Sync,
>;

/// Predicate over one item's asset-tag list; the host applies it to build
/// the named collection.
pub type CollectionFilter = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

/// Registration surface of the host build tool.
pub trait PluginHost {
    fn add_shortcode(&mut self, name: &str, shortcode: Shortcode);
    fn add_template(&mut self, name: &str, template: Box<dyn TemplateAsset>);
    fn add_collection(&mut self, name: &str, filter: CollectionFilter);
}

// ============================================================================
// Transform Registry
// ============================================================================

/// Built-in transforms, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// Read the source file as UTF-8 and pass it through unchanged.
    #[default]
    Copy,
}

impl TransformKind {
    /// Construct the transform this kind names.
    pub fn build(self) -> TransformFn {
        match self {
            Self::Copy => {
                Box::new(|path, _production| Ok(Content::Text(std::fs::read_to_string(path)?)))
            }
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// Settings for one asset kind (styles or scripts).
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct AssetKindOptions {
    /// Disabled kinds register nothing.
    pub enabled: bool,

    /// Built-in transform used when no custom one is attached.
    pub transform: TransformKind,

    /// Processor configuration for this kind.
    #[serde(flatten)]
    pub config: ProcessorConfig,

    /// Custom transform; takes precedence over `transform`.
    #[serde(skip)]
    pub process_file: Option<TransformFn>,
}

impl AssetKindOptions {
    /// Attach a custom transform.
    pub fn with_transform(mut self, transform: TransformFn) -> Self {
        self.process_file = Some(transform);
        self
    }
}

impl Default for AssetKindOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            transform: TransformKind::Copy,
            config: ProcessorConfig::default(),
            process_file: None,
        }
    }
}

impl fmt::Debug for AssetKindOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetKindOptions")
            .field("enabled", &self.enabled)
            .field("transform", &self.transform)
            .field("config", &self.config)
            .field("process_file", &self.process_file.is_some())
            .finish()
    }
}

/// Plugin options: one kind per asset family.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginOptions {
    pub styles: AssetKindOptions,
    pub scripts: AssetKindOptions,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            styles: AssetKindOptions {
                config: ProcessorConfig {
                    collection: "_styles".to_string(),
                    in_directory: OneOrMany::One("_assets/css".into()),
                    in_extension: "css".to_string(),
                    out_extension: "css".to_string(),
                    out_directory: "_assets/css".into(),
                    production: false,
                },
                ..AssetKindOptions::default()
            },
            scripts: AssetKindOptions {
                config: ProcessorConfig {
                    collection: "_scripts".to_string(),
                    in_directory: OneOrMany::One("_assets/js".into()),
                    in_extension: "js".to_string(),
                    out_extension: "js".to_string(),
                    out_directory: "_assets/js".into(),
                    production: false,
                },
                ..AssetKindOptions::default()
            },
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Register shortcodes, templates, and collections with the host.
///
/// Shortcodes are always registered; templates and collection filters only
/// for enabled kinds. Configuration problems fail here, before the host
/// runs any build.
pub fn register<H: PluginHost>(host: &mut H, options: PluginOptions) -> Result<(), ConfigError> {
    host.add_shortcode(
        "assetLink",
        Box::new(|collection, key, attributes, options| {
            asset_link(collection, key, attributes, options, &ConsoleSink)
        }),
    );
    host.add_shortcode(
        "scriptLink",
        Box::new(|collection, key, _attributes, options| {
            script_link(collection, key, options, &ConsoleSink)
        }),
    );

    for (name, kind) in [("styles", options.styles), ("scripts", options.scripts)] {
        if kind.enabled {
            register_kind(host, name, kind)?;
        }
    }
    Ok(())
}

fn register_kind<H: PluginHost>(
    host: &mut H,
    name: &str,
    kind: AssetKindOptions,
) -> Result<(), ConfigError> {
    let collection = kind.config.collection.clone();
    let transform = kind
        .process_file
        .unwrap_or_else(|| kind.transform.build());
    let processor = AssetProcessor::new(kind.config)?.with_transform(transform);

    host.add_template(name, Box::new(processor));

    let tag = collection.clone();
    host.add_collection(
        &collection,
        Box::new(move |tags| tags.iter().any(|t| *t == tag)),
    );
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
