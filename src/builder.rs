use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::fs::{DirFs, OsFs};
use crate::make_dir::{make, make_blocking};
use crate::path;

/// A builder for creating a directory together with its missing parents.
///
/// This is the configurable form of [`make_dir`](crate::make_dir()): it
/// carries the permission mode for newly created directories and the
/// primitive set the creation runs against. Options left unset fall back to
/// the defaults described on each method.
///
/// # Examples
///
/// ```no_run
/// use make_dir::MakeDir;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), make_dir::Error> {
/// let made = MakeDir::new()
///     .mode(0o750)
///     .create("/var/lib/app/cache")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MakeDir<F = OsFs> {
    mode: Option<u32>,
    fs: F,
}

impl MakeDir<OsFs> {
    /// Creates a new builder targeting the host filesystem with default
    /// options.
    pub fn new() -> MakeDir<OsFs> {
        MakeDir {
            mode: None,
            fs: OsFs,
        }
    }
}

impl Default for MakeDir<OsFs> {
    fn default() -> MakeDir<OsFs> {
        MakeDir::new()
    }
}

impl<F: DirFs> MakeDir<F> {
    /// Creates a builder running against a custom primitive set instead of
    /// the host filesystem.
    ///
    /// With a custom set the default mode is plain `0o777`, unmasked; the
    /// set itself owns any masking it wants to do. Only the host default is
    /// trusted to know the process umask.
    pub fn with_fs(fs: F) -> MakeDir<F> {
        MakeDir { mode: None, fs }
    }

    /// Sets the permission mode for every directory this call creates.
    ///
    /// Pre-existing directories keep their mode. When unset, the default is
    /// `0o777` masked by the process umask on the host filesystem, and
    /// unmasked `0o777` for a custom primitive set. Ignored on platforms
    /// without Unix permission bits.
    pub fn mode(&mut self, mode: u32) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    /// Creates the directory named by `path` and any missing parents,
    /// returning the resolved absolute path of `path` itself.
    ///
    /// The input is resolved once, up front: made absolute against the
    /// current working directory and lexically normalized. Ancestors are
    /// derived from the resolved form. On Windows the unresolved input is
    /// first checked for characters the filesystem forbids, before anything
    /// touches the disk.
    pub async fn create(&self, path: impl AsRef<Path>) -> Result<PathBuf, Error> {
        let path = path.as_ref();
        #[cfg(windows)]
        path::check_reserved_characters(path)?;
        let resolved = path::resolve(path)?;
        let mode = self.mode.unwrap_or_else(|| self.fs.default_mode());
        make(&self.fs, &resolved, mode).await?;
        Ok(resolved)
    }

    /// Blocking version of [`create`](MakeDir::create). Identical outcomes
    /// for identical filesystem states; usable without a runtime.
    pub fn create_blocking(&self, path: impl AsRef<Path>) -> Result<PathBuf, Error> {
        let path = path.as_ref();
        #[cfg(windows)]
        path::check_reserved_characters(path)?;
        let resolved = path::resolve(path)?;
        let mode = self.mode.unwrap_or_else(|| self.fs.default_mode());
        make_blocking(&self.fs, &resolved, mode)?;
        Ok(resolved)
    }
}
