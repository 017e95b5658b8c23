//! Keeps file operations inside the executor's base directory.

use crate::error::ToolError;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base_dir` without requiring it to exist.
pub fn join_base(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Resolve a file that must already exist and check it stays under `base_dir`.
pub fn resolve_existing(path: &Path, base_dir: &Path) -> Result<PathBuf, ToolError> {
    let base = canonical_base(base_dir)?;
    let candidate = normalize(&join_base(path, &base));
    let canonical = candidate
        .canonicalize()
        .map_err(|e| ToolError::ExecutionError(format!("Cannot resolve path: {e}")))?;
    ensure_within(path, &canonical, &base)?;
    Ok(canonical)
}

/// Resolve a possibly-new file and check it stays under `base_dir`.
///
/// The deepest existing ancestor is canonicalized so a symlinked directory
/// cannot be used to escape the base.
pub fn resolve_for_write(path: &Path, base_dir: &Path) -> Result<PathBuf, ToolError> {
    let base = canonical_base(base_dir)?;
    let candidate = normalize(&join_base(path, &base));

    let resolved = if candidate.exists() {
        candidate
            .canonicalize()
            .map_err(|e| ToolError::ExecutionError(format!("Cannot resolve path: {e}")))?
    } else {
        let (existing, tail) = split_existing_ancestor(&candidate)?;
        existing.join(tail)
    };

    ensure_within(path, &resolved, &base)?;
    Ok(resolved)
}

fn canonical_base(base_dir: &Path) -> Result<PathBuf, ToolError> {
    base_dir
        .canonicalize()
        .map_err(|e| ToolError::ExecutionError(format!("Cannot resolve base directory: {e}")))
}

fn ensure_within(original: &Path, resolved: &Path, base: &Path) -> Result<(), ToolError> {
    if !resolved.starts_with(base) {
        return Err(ToolError::PermissionDenied(format!(
            "Path '{}' is outside the base directory",
            original.display()
        )));
    }
    Ok(())
}

fn split_existing_ancestor(path: &Path) -> Result<(PathBuf, PathBuf), ToolError> {
    let unresolvable = || ToolError::ExecutionError(format!("Cannot resolve path: {}", path.display()));

    let mut existing = path.to_path_buf();
    let mut tail = PathBuf::new();
    while !existing.exists() {
        let name = existing.file_name().ok_or_else(unresolvable)?;
        tail = if tail.as_os_str().is_empty() {
            PathBuf::from(name)
        } else {
            PathBuf::from(name).join(&tail)
        };
        existing = existing.parent().ok_or_else(unresolvable)?.to_path_buf();
    }

    let canonical = existing
        .canonicalize()
        .map_err(|e| ToolError::ExecutionError(format!("Cannot resolve path: {e}")))?;
    Ok((canonical, tail))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::RootDir => out.push(component.as_os_str()),
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::Normal(seg) => out.push(seg),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_inside_base() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_for_write(Path::new("a/b.txt"), dir.path()).unwrap();
        assert!(resolved.starts_with(dir.path().canonicalize().unwrap()));
        assert!(resolved.ends_with("a/b.txt"));
    }

    #[test]
    fn test_parent_escape_rejected() {
        let dir = TempDir::new().unwrap();
        let result = resolve_for_write(Path::new("../escape.txt"), dir.path());
        assert!(matches!(result, Err(ToolError::PermissionDenied(_))));
    }

    #[test]
    fn test_absolute_outside_rejected() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let target = outside.path().join("x.txt");
        std::fs::write(&target, "x").unwrap();
        let result = resolve_existing(&target, dir.path());
        assert!(matches!(result, Err(ToolError::PermissionDenied(_))));
    }

    #[test]
    fn test_existing_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let result = resolve_existing(Path::new("nope.txt"), dir.path());
        assert!(matches!(result, Err(ToolError::ExecutionError(_))));
    }
}
