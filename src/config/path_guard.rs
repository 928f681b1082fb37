//! Path sanitization for configured directories.
//!
//! Directory paths from the settings surface are normalized lexically and
//! rejected when a parent-directory component survives normalization, which
//! blocks escaping the project root via relative traversal. Runs at
//! construction time, before any I/O.

use std::path::{Component, Path, PathBuf};

use super::ConfigError;

/// Normalize `path` and reject traversal attempts.
///
/// Drops `.` components and folds `a/b/..` pairs. A `..` that cannot be
/// folded away fails with [`ConfigError::Traversal`] naming `role` (e.g.
/// "input directory"). Empty paths are rejected; a path that normalizes to
/// nothing (e.g. `"."`) becomes `"."`.
pub fn sanitize(path: &Path, role: &str) -> Result<PathBuf, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath {
            role: role.to_string(),
        });
    }

    let mut normalized = PathBuf::new();
    // Normal components that a later `..` may fold away.
    let mut depth = 0usize;

    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::Prefix(_) | Component::RootDir => {
                normalized.push(comp.as_os_str());
            }
            Component::Normal(c) => {
                normalized.push(c);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    return Err(ConfigError::Traversal {
                        role: role.to_string(),
                        path: path.to_path_buf(),
                    });
                }
                normalized.pop();
                depth -= 1;
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    Ok(normalized)
}
