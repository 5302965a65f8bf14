use std::future::Future;
use std::io;
use std::path::Path;

use tokio::task::spawn_blocking;

/// The create/inspect surface directory creation is built on.
///
/// The default implementation, [`OsFs`], binds to the host filesystem. Test
/// doubles and wrapped filesystems implement the same four operations to
/// simulate races and failures deterministically, or to instrument the real
/// calls.
///
/// Both primitives must report failures through [`io::Error`] with a
/// meaningful [`io::ErrorKind`]: `create_dir` must distinguish at least
/// "parent missing" (`NotFound`), "already exists" (`AlreadyExists`) and
/// "denied" (`PermissionDenied`), since the recovery logic branches on those.
/// `create_dir` creates a single path segment; it must not create ancestors
/// itself.
pub trait DirFs: Send + Sync {
    /// Creates the directory named by `path`, non-recursively, with the given
    /// permission mode (ignored on platforms without Unix modes).
    fn create_dir(&self, path: &Path, mode: u32) -> impl Future<Output = io::Result<()>> + Send;

    /// Reports whether `path` names a directory. Fails if the path cannot be
    /// inspected at all, e.g. it does not exist.
    fn is_dir(&self, path: &Path) -> impl Future<Output = io::Result<bool>> + Send;

    /// Blocking form of [`create_dir`](DirFs::create_dir).
    fn create_dir_blocking(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Blocking form of [`is_dir`](DirFs::is_dir).
    fn is_dir_blocking(&self, path: &Path) -> io::Result<bool>;

    /// The mode used when the caller does not pick one.
    ///
    /// Custom filesystems get plain `0o777` and are responsible for any
    /// masking they want; [`OsFs`] overrides this with the process umask
    /// applied.
    fn default_mode(&self) -> u32 {
        0o777
    }
}

impl<'a, F: DirFs> DirFs for &'a F {
    fn create_dir(&self, path: &Path, mode: u32) -> impl Future<Output = io::Result<()>> + Send {
        (**self).create_dir(path, mode)
    }

    fn is_dir(&self, path: &Path) -> impl Future<Output = io::Result<bool>> + Send {
        (**self).is_dir(path)
    }

    fn create_dir_blocking(&self, path: &Path, mode: u32) -> io::Result<()> {
        (**self).create_dir_blocking(path, mode)
    }

    fn is_dir_blocking(&self, path: &Path) -> io::Result<bool> {
        (**self).is_dir_blocking(path)
    }

    fn default_mode(&self) -> u32 {
        (**self).default_mode()
    }
}

/// The host filesystem, the default primitive set.
///
/// Async operations run on the blocking thread pool via
/// [`tokio::task::spawn_blocking`], so they must be used from within a Tokio
/// runtime. The blocking operations call [`std::fs`] directly and work
/// anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl DirFs for OsFs {
    async fn create_dir(&self, path: &Path, mode: u32) -> io::Result<()> {
        let path = path.to_owned();
        asyncify(move || create_dir_with_mode(&path, mode)).await
    }

    async fn is_dir(&self, path: &Path) -> io::Result<bool> {
        let path = path.to_owned();
        asyncify(move || std::fs::metadata(path).map(|m| m.is_dir())).await
    }

    fn create_dir_blocking(&self, path: &Path, mode: u32) -> io::Result<()> {
        create_dir_with_mode(path, mode)
    }

    fn is_dir_blocking(&self, path: &Path) -> io::Result<bool> {
        std::fs::metadata(path).map(|m| m.is_dir())
    }

    /// `0o777` with the umask in effect at the moment of the call applied.
    fn default_mode(&self) -> u32 {
        0o777 & !current_umask()
    }
}

async fn asyncify<F, T>(f: F) -> io::Result<T>
where
    F: FnOnce() -> io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match spawn_blocking(f).await {
        Ok(res) => res,
        Err(_) => Err(io::Error::other("background task failed")),
    }
}

#[cfg(unix)]
fn create_dir_with_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    let mut builder = std::fs::DirBuilder::new();
    builder.mode(mode);
    builder.create(path)
}

#[cfg(not(unix))]
fn create_dir_with_mode(path: &Path, _mode: u32) -> io::Result<()> {
    std::fs::DirBuilder::new().create(path)
}

/// Reads the process umask. `umask(2)` only reports by replacing, so this
/// sets a zero mask and immediately puts the old one back; concurrent umask
/// changes elsewhere in the process race this, which is inherent to umask
/// being process-global state.
#[cfg(unix)]
fn current_umask() -> u32 {
    // SAFETY: umask cannot fail; it only swaps the process file mode mask.
    let mask = unsafe { libc::umask(0) };
    unsafe { libc::umask(mask) };
    mask as u32
}

#[cfg(not(unix))]
fn current_umask() -> u32 {
    0
}
