use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::Error;

/// Resolves `path` to an absolute, lexically normalized form.
///
/// Relative paths are joined onto the current working directory; `.`
/// components are dropped and `..` components pop the preceding component
/// (never past the root). Unlike [`std::fs::canonicalize`] this performs no
/// symlink resolution and touches nothing on disk, which matters here: the
/// target does not exist yet.
///
/// Called once per top-level invocation; ancestors are then derived from the
/// result with [`Path::parent`], never re-resolved.
pub(crate) fn resolve(path: &Path) -> Result<PathBuf, Error> {
    if path.as_os_str().is_empty() {
        return Err(Error::invalid_path(path, "path is empty"));
    }

    let absolute = if path.is_absolute() {
        path.to_owned()
    } else {
        let cwd = env::current_dir().map_err(|e| Error::classify(path, e))?;
        cwd.join(path)
    };

    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            // `pop` refuses to remove the root, so `..` at the top is a no-op.
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Characters NTFS and FAT refuse inside a path segment. The drive prefix is
/// exempt; [`Path::components`] already splits it off as `Component::Prefix`.
#[cfg_attr(not(windows), allow(dead_code))]
const RESERVED: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Rejects paths Windows can never create, before any filesystem access.
///
/// Runs against the path as the caller wrote it, not the resolved form, so
/// the error points at the caller's own input. Other platforms skip this
/// check entirely.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn check_reserved_characters(path: &Path) -> Result<(), Error> {
    for component in path.components() {
        if let Component::Normal(part) = component {
            if part.to_string_lossy().contains(RESERVED) {
                return Err(Error::invalid_path(path, "path contains invalid characters"));
            }
        }
    }
    Ok(())
}
