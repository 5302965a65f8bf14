use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::trace;

use crate::builder::MakeDir;
use crate::error::Error;
use crate::fs::DirFs;

/// Creates a directory and any missing parents, returning the resolved
/// absolute path of the requested directory.
///
/// This is the `mkdir -p` of the crate: intermediate directories are created
/// as needed, an already existing directory is a success, and concurrent
/// calls targeting the same path are guaranteed not to fail against each
/// other. Created directories get mode `0o777` masked by the process umask;
/// use [`MakeDir`] to pick a different mode or swap the filesystem.
///
/// Filesystem work runs on the blocking thread pool, so this must be called
/// from within a Tokio runtime.
///
/// # Errors
///
/// Fails with a structured [`Error`] when the target or an ancestor is
/// occupied by a non-directory, creation is denied, or the path is invalid
/// for the platform. See [`ErrorKind`](crate::ErrorKind) for the taxonomy.
///
/// # Examples
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), make_dir::Error> {
/// let made = make_dir::make_dir("/tmp/some/deep/dir").await?;
/// assert_eq!(made.file_name().unwrap(), "dir");
/// # Ok(())
/// # }
/// ```
pub async fn make_dir(path: impl AsRef<Path>) -> Result<PathBuf, Error> {
    MakeDir::new().create(path).await
}

/// Blocking version of [`make_dir`].
///
/// Identical semantics, but runs the filesystem calls on the calling thread
/// and needs no runtime.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> Result<(), make_dir::Error> {
/// let made = make_dir::make_dir_sync("some/relative/dir")?;
/// assert!(made.is_absolute());
/// # Ok(())
/// # }
/// ```
pub fn make_dir_sync(path: impl AsRef<Path>) -> Result<PathBuf, Error> {
    MakeDir::new().create_blocking(path)
}

/// One level of the recursive creation algorithm, async rendition.
///
/// Attempts a single non-recursive create; on a missing parent it repairs
/// the ancestor chain and retries itself, so a parent created concurrently
/// by another caller is simply observed as success on the retry. Any other
/// failure is double-checked against the actual state of the path before
/// being surfaced: "already a directory" is a benign race, everything else
/// propagates the original creation error.
///
/// Boxing breaks the recursive future type; `path` shrinks towards the root
/// on every nested call, so the recursion depth is the component count.
pub(crate) fn make<'a, F: DirFs>(
    fs: &'a F,
    path: &'a Path,
    mode: u32,
) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>> {
    Box::pin(async move {
        let err = match fs.create_dir(path, mode).await {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        match err.kind() {
            // Creating a parent cannot cure a denial; recursing would only
            // bury the real error under nested failures.
            io::ErrorKind::PermissionDenied => Err(Error::classify(path, err)),
            io::ErrorKind::NotFound => match path.parent() {
                None => Err(Error::root_unreachable(path)),
                Some(parent) => {
                    trace!(path = %path.display(), "parent missing, repairing ancestors");
                    make(fs, parent, mode).await?;
                    make(fs, path, mode).await
                }
            },
            _ => match fs.is_dir(path).await {
                Ok(true) => {
                    trace!(path = %path.display(), "already a directory, treating as success");
                    Ok(())
                }
                // The caller ran into the creation failure; the inspection
                // outcome only decides whether it was benign.
                Ok(false) | Err(_) => Err(Error::classify(path, err)),
            },
        }
    })
}

/// Blocking rendition of [`make`]. Same decisions in the same order, calling
/// the blocking primitives.
pub(crate) fn make_blocking<F: DirFs>(fs: &F, path: &Path, mode: u32) -> Result<(), Error> {
    let err = match fs.create_dir_blocking(path, mode) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    match err.kind() {
        io::ErrorKind::PermissionDenied => Err(Error::classify(path, err)),
        io::ErrorKind::NotFound => match path.parent() {
            None => Err(Error::root_unreachable(path)),
            Some(parent) => {
                trace!(path = %path.display(), "parent missing, repairing ancestors");
                make_blocking(fs, parent, mode)?;
                make_blocking(fs, path, mode)
            }
        },
        _ => match fs.is_dir_blocking(path) {
            Ok(true) => {
                trace!(path = %path.display(), "already a directory, treating as success");
                Ok(())
            }
            Ok(false) | Err(_) => Err(Error::classify(path, err)),
        },
    }
}
