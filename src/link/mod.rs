//! Lookup-and-render helpers for processed assets.
//!
//! [`asset_link`] and [`script_link`] look up one record in a collection by
//! key and emit a `<link>` or `<script>` tag, carrying integrity and
//! crossorigin attributes when the record was processed in production.
//!
//! Both run inside template rendering, where a hard stop is often worse
//! than a visibly missing asset: by default any validation failure or
//! lookup miss is reported through the [`DiagnosticSink`] and yields an
//! empty string. With [`LinkOptions::throw_on_missing`] the same conditions
//! fail with a descriptive [`LinkError`] instead.
//!
//! Attribute values are substituted verbatim, without escaping of embedded
//! quotes. Keys and URLs come from the build's own filesystem, not from
//! untrusted input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logger::DiagnosticSink;

// ============================================================================
// Collection Model
// ============================================================================

/// Lookup fields of a collection item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemData {
    /// Lookup key: the original filename of the processed asset.
    pub key: String,
    /// SRI string, present for production-built assets.
    #[serde(default)]
    pub integrity: Option<String>,
}

/// One record-like item of the collection the host exposes to templates.
///
/// Items missing `data` are malformed and skipped during lookup; an item
/// that matches but has no usable `url` is found-but-broken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionItem {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub data: Option<ItemData>,
}

impl CollectionItem {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            data: Some(ItemData {
                key: key.into(),
                integrity: None,
            }),
        }
    }

    pub fn with_integrity(mut self, integrity: impl Into<String>) -> Self {
        if let Some(data) = &mut self.data {
            data.integrity = Some(integrity.into());
        }
        self
    }
}

/// Behavior on validation failure or lookup miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkOptions {
    /// Fail with a [`LinkError`] instead of degrading to an empty string.
    pub throw_on_missing: bool,
}

impl LinkOptions {
    pub const STRICT: Self = Self {
        throw_on_missing: true,
    };
}

// ============================================================================
// LinkError
// ============================================================================

/// Call-time argument and lookup errors of the link helpers.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error(
        "{helper} requires a collection as the first parameter; \
         pass the collection exposed by the host build"
    )]
    MissingCollection { helper: &'static str },

    #[error("{helper} key cannot be empty; provide the filename of the asset, e.g. \"main.css\"")]
    EmptyKey { helper: &'static str },

    #[error("asset \"{key}\" not found in collection; available keys: {available}")]
    NotFound { key: String, available: String },

    #[error(
        "asset \"{key}\" found but has no valid URL; \
         this may indicate a problem with asset processing"
    )]
    BrokenAsset { key: String },
}

// ============================================================================
// Lookup
// ============================================================================

/// Shared lookup: first item whose `data.key` matches, skipping malformed
/// items without aborting the scan.
fn resolve<'a>(
    helper: &'static str,
    collection: Option<&'a [CollectionItem]>,
    key: &str,
) -> Result<(&'a str, &'a ItemData), LinkError> {
    let collection = collection.ok_or(LinkError::MissingCollection { helper })?;

    if key.trim().is_empty() {
        return Err(LinkError::EmptyKey { helper });
    }

    for item in collection {
        let Some(data) = &item.data else { continue };
        if data.key == key {
            let url = item
                .url
                .as_deref()
                .filter(|u| !u.is_empty())
                .ok_or_else(|| LinkError::BrokenAsset {
                    key: key.to_string(),
                })?;
            return Ok((url, data));
        }
    }

    Err(LinkError::NotFound {
        key: key.to_string(),
        available: available_keys(collection),
    })
}

/// Keys present in the collection, joined for the not-found message.
fn available_keys(collection: &[CollectionItem]) -> String {
    let keys: Vec<&str> = collection
        .iter()
        .filter_map(|item| item.data.as_ref().map(|d| d.key.as_str()))
        .collect();
    if keys.is_empty() {
        "(none)".to_string()
    } else {
        keys.join(", ")
    }
}

/// Default mode reports and degrades to an empty string; strict mode
/// propagates the error.
fn finish(
    result: Result<String, LinkError>,
    helper: &'static str,
    options: &LinkOptions,
    sink: &dyn DiagnosticSink,
) -> Result<String, LinkError> {
    match result {
        Ok(tag) => Ok(tag),
        Err(err) if options.throw_on_missing => Err(err),
        Err(err) => {
            sink.report(helper, &err.to_string());
            Ok(String::new())
        }
    }
}

/// Set an attribute, replacing the value in place if the name is already
/// present, appending otherwise.
fn set_attr(attrs: &mut Vec<(String, String)>, name: &str, value: &str) {
    if let Some(slot) = attrs.iter_mut().find(|(n, _)| n == name) {
        slot.1 = value.to_string();
    } else {
        attrs.push((name.to_string(), value.to_string()));
    }
}

// ============================================================================
// Renderers
// ============================================================================

/// Render a `<link>` tag for the asset matching `key`.
///
/// Caller attributes are emitted in the order given; `rel="stylesheet"` is
/// appended when the caller supplied no `rel`. When the matched record
/// carries an integrity hash, `integrity` and `crossorigin="anonymous"` are
/// force-set after the merge and cannot be overridden by caller attributes.
pub fn asset_link(
    collection: Option<&[CollectionItem]>,
    key: &str,
    attributes: &[(&str, &str)],
    options: &LinkOptions,
    sink: &dyn DiagnosticSink,
) -> Result<String, LinkError> {
    let result = resolve("assetLink", collection, key).map(|(url, data)| {
        let mut attrs: Vec<(String, String)> = attributes
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();

        if !attrs.iter().any(|(n, _)| n == "rel") {
            attrs.push(("rel".to_string(), "stylesheet".to_string()));
        }

        if let Some(integrity) = &data.integrity {
            set_attr(&mut attrs, "integrity", integrity);
            set_attr(&mut attrs, "crossorigin", "anonymous");
        }

        let mut tag = format!("<link href=\"{url}\" ");
        for (name, value) in &attrs {
            tag.push_str(&format!("{name}=\"{value}\" "));
        }
        tag.push_str("/>");
        tag
    });

    finish(result, "assetLink", options, sink)
}

/// Render a `<script>` tag for the asset matching `key`.
///
/// No caller-supplied attributes; the tag takes exactly one of two forms
/// depending on whether the matched record carries an integrity hash.
pub fn script_link(
    collection: Option<&[CollectionItem]>,
    key: &str,
    options: &LinkOptions,
    sink: &dyn DiagnosticSink,
) -> Result<String, LinkError> {
    let result = resolve("scriptLink", collection, key).map(|(url, data)| {
        match &data.integrity {
            Some(integrity) => format!(
                "<script src=\"{url}\" integrity=\"{integrity}\" \
                 crossorigin=\"anonymous\" defer></script>"
            ),
            None => format!("<script src=\"{url}\" defer></script>"),
        }
    });

    finish(result, "scriptLink", options, sink)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Sink that records every diagnostic for assertions.
    #[derive(Default)]
    struct RecordingSink {
        reports: Mutex<Vec<String>>,
    }

    impl DiagnosticSink for RecordingSink {
        fn report(&self, scope: &str, message: &str) {
            self.reports
                .lock()
                .unwrap()
                .push(format!("[{scope}] {message}"));
        }
    }

    impl RecordingSink {
        fn reports(&self) -> Vec<String> {
            self.reports.lock().unwrap().clone()
        }
    }

    fn styles() -> Vec<CollectionItem> {
        vec![
            CollectionItem::new("main.css", "/assets/css/main-ABC123DEF4.css")
                .with_integrity("sha512-ABC123"),
            CollectionItem::new("print.css", "/assets/css/print.css"),
        ]
    }

    #[test]
    fn test_asset_link_with_integrity() {
        let collection = styles();
        let sink = RecordingSink::default();
        let tag = asset_link(
            Some(collection.as_slice()),
            "main.css",
            &[],
            &LinkOptions::default(),
            &sink,
        )
        .unwrap();

        assert!(tag.contains("href=\"/assets/css/main-ABC123DEF4.css\""));
        assert!(tag.contains("rel=\"stylesheet\""));
        assert!(tag.contains("integrity=\"sha512-ABC123\""));
        assert!(tag.contains("crossorigin=\"anonymous\""));
        assert!(tag.starts_with("<link "));
        assert!(tag.ends_with("/>"));
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn test_asset_link_without_integrity() {
        let collection = styles();
        let sink = RecordingSink::default();
        let tag = asset_link(
            Some(collection.as_slice()),
            "print.css",
            &[],
            &LinkOptions::default(),
            &sink,
        )
        .unwrap();

        assert_eq!(tag, "<link href=\"/assets/css/print.css\" rel=\"stylesheet\" />");
    }

    #[test]
    fn test_asset_link_caller_attributes_win() {
        let collection = styles();
        let sink = RecordingSink::default();
        let tag = asset_link(
            Some(collection.as_slice()),
            "print.css",
            &[("rel", "preload"), ("media", "print")],
            &LinkOptions::default(),
            &sink,
        )
        .unwrap();

        // Caller's rel overrides the default; insertion order preserved.
        assert_eq!(
            tag,
            "<link href=\"/assets/css/print.css\" rel=\"preload\" media=\"print\" />"
        );
    }

    #[test]
    fn test_asset_link_integrity_not_overridable() {
        let collection = styles();
        let sink = RecordingSink::default();
        let tag = asset_link(
            Some(collection.as_slice()),
            "main.css",
            &[("integrity", "sha512-FORGED"), ("crossorigin", "use-credentials")],
            &LinkOptions::default(),
            &sink,
        )
        .unwrap();

        assert!(tag.contains("integrity=\"sha512-ABC123\""));
        assert!(tag.contains("crossorigin=\"anonymous\""));
        assert!(!tag.contains("FORGED"));
        assert!(!tag.contains("use-credentials"));
    }

    #[test]
    fn test_asset_link_missing_collection_degrades() {
        let sink = RecordingSink::default();
        let tag = asset_link(None, "x.css", &[], &LinkOptions::default(), &sink).unwrap();
        assert_eq!(tag, "");
        assert_eq!(sink.reports().len(), 1);
        assert!(sink.reports()[0].starts_with("[assetLink]"));
    }

    #[test]
    fn test_asset_link_missing_collection_strict() {
        let sink = RecordingSink::default();
        let err = asset_link(None, "x.css", &[], &LinkOptions::STRICT, &sink).unwrap_err();
        assert!(matches!(err, LinkError::MissingCollection { .. }));
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn test_asset_link_not_found_lists_available_keys() {
        let collection = styles();
        let sink = RecordingSink::default();
        let err = asset_link(
            Some(collection.as_slice()),
            "missing.css",
            &[],
            &LinkOptions::STRICT,
            &sink,
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("missing.css"));
        assert!(msg.contains("main.css, print.css"));
    }

    #[test]
    fn test_asset_link_empty_key() {
        let collection = styles();
        let sink = RecordingSink::default();

        let tag = asset_link(Some(collection.as_slice()), "  ", &[], &LinkOptions::default(), &sink).unwrap();
        assert_eq!(tag, "");

        let err =
            asset_link(Some(collection.as_slice()), "", &[], &LinkOptions::STRICT, &sink).unwrap_err();
        assert!(matches!(err, LinkError::EmptyKey { .. }));
    }

    #[test]
    fn test_malformed_items_skipped() {
        let collection = vec![
            CollectionItem {
                url: Some("/broken".to_string()),
                data: None,
            },
            CollectionItem::new("main.css", "/main.css"),
        ];
        let sink = RecordingSink::default();
        let tag = asset_link(
            Some(collection.as_slice()),
            "main.css",
            &[],
            &LinkOptions::default(),
            &sink,
        )
        .unwrap();
        assert!(tag.contains("href=\"/main.css\""));
    }

    #[test]
    fn test_found_but_broken_url() {
        let collection = vec![CollectionItem {
            url: None,
            data: Some(ItemData {
                key: "main.css".to_string(),
                integrity: None,
            }),
        }];
        let sink = RecordingSink::default();

        let tag = asset_link(
            Some(collection.as_slice()),
            "main.css",
            &[],
            &LinkOptions::default(),
            &sink,
        )
        .unwrap();
        assert_eq!(tag, "");
        assert!(sink.reports()[0].contains("no valid URL"));

        let err = asset_link(
            Some(collection.as_slice()),
            "main.css",
            &[],
            &LinkOptions::STRICT,
            &sink,
        )
        .unwrap_err();
        assert!(matches!(err, LinkError::BrokenAsset { .. }));
    }

    #[test]
    fn test_script_link_without_integrity() {
        let collection = vec![CollectionItem::new("app.js", "/assets/js/app.js")];
        let sink = RecordingSink::default();
        let tag = script_link(Some(collection.as_slice()), "app.js", &LinkOptions::default(), &sink)
            .unwrap();
        assert_eq!(tag, "<script src=\"/assets/js/app.js\" defer></script>");
    }

    #[test]
    fn test_script_link_with_integrity() {
        let collection = vec![
            CollectionItem::new("app.js", "/assets/js/app-XYZ.js").with_integrity("sha512-XYZ"),
        ];
        let sink = RecordingSink::default();
        let tag = script_link(Some(collection.as_slice()), "app.js", &LinkOptions::default(), &sink)
            .unwrap();
        assert_eq!(
            tag,
            "<script src=\"/assets/js/app-XYZ.js\" integrity=\"sha512-XYZ\" \
             crossorigin=\"anonymous\" defer></script>"
        );
    }

    #[test]
    fn test_script_link_missing_degrades_and_strict_throws() {
        let collection = vec![CollectionItem::new("app.js", "/app.js")];
        let sink = RecordingSink::default();

        let tag = script_link(Some(collection.as_slice()), "gone.js", &LinkOptions::default(), &sink)
            .unwrap();
        assert_eq!(tag, "");
        assert!(sink.reports()[0].contains("gone.js"));

        let err = script_link(Some(collection.as_slice()), "gone.js", &LinkOptions::STRICT, &sink)
            .unwrap_err();
        assert!(matches!(err, LinkError::NotFound { .. }));
    }

    #[test]
    fn test_collection_item_deserializes() {
        let item: CollectionItem = toml::from_str(
            r#"
url = "/assets/css/main.css"

[data]
key = "main.css"
integrity = "sha512-ABC"
"#,
        )
        .unwrap();
        assert_eq!(item.url.as_deref(), Some("/assets/css/main.css"));
        assert_eq!(item.data.unwrap().integrity.as_deref(), Some("sha512-ABC"));
    }
}
