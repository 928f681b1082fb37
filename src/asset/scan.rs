//! Asset scanning functions (pure, no side effects).

use std::io;
use std::path::{Path, PathBuf};

/// Files with this suffix are host-framework virtual templates, never assets.
/// They are excluded from scanning even when the extension matches.
pub const VIRTUAL_TEMPLATE_SUFFIX: &str = ".11ty.js";

/// Check whether a path is a host-framework virtual template file.
pub fn is_virtual_template(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(VIRTUAL_TEMPLATE_SUFFIX))
}

/// List the files directly inside `dir` whose extension is `extension`.
///
/// Non-recursive. Virtual template files are always skipped. Order is the
/// filesystem listing order, not sorted. A missing directory yields an
/// empty list, not an error; supporting legitimately empty asset
/// directories is the caller's concern.
pub fn scan_directory(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Ok(Vec::new());
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if is_virtual_template(&path) {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    Ok(files)
}
