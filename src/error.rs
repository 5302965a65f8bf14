use std::io;
use std::path::{Path, PathBuf};

/// Error returned by [`make_dir`], [`make_dir_sync`] and [`MakeDir`].
///
/// Carries the path the operation stumbled over, a machine-checkable
/// [`ErrorKind`], and the underlying [`io::Error`] as its source. When a
/// creation attempt fails and the path turns out to be occupied by something
/// that is not a directory, the *creation* error is what you get here, not
/// whatever the follow-up inspection reported.
///
/// [`make_dir`]: crate::make_dir()
/// [`make_dir_sync`]: crate::make_dir_sync
/// [`MakeDir`]: crate::MakeDir
#[derive(Debug, thiserror::Error)]
#[error("cannot create directory `{}`: {source}", path.display())]
pub struct Error {
    kind: ErrorKind,
    path: PathBuf,
    #[source]
    source: io::Error,
}

/// A list of the ways directory creation can fail.
///
/// Obtained through [`Error::kind`]. The variants abstract over the host's
/// native error codes; the exact code is still available through the
/// [`io::Error`] source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A non-directory already occupies the target or an ancestor path.
    AlreadyExistsAsFile,
    /// An ancestor path component exists but cannot be traversed as a
    /// directory.
    NotADirectory,
    /// Creation was denied by access control. Never retried: creating a
    /// parent cannot make the denial go away.
    PermissionDenied,
    /// The path is empty, contains an embedded NUL, or contains characters
    /// the target platform's filesystem forbids.
    InvalidPath,
    /// A path component could not be found and could not be created either.
    NotFound,
    /// Any other failure reported by the underlying primitives.
    Other,
}

impl ErrorKind {
    fn from_io(kind: io::ErrorKind) -> ErrorKind {
        match kind {
            io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExistsAsFile,
            io::ErrorKind::NotADirectory => ErrorKind::NotADirectory,
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            io::ErrorKind::InvalidInput => ErrorKind::InvalidPath,
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        }
    }
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, path: &Path, source: io::Error) -> Error {
        Error {
            kind,
            path: path.to_owned(),
            source,
        }
    }

    /// Wraps an error from a creation or inspection primitive, deriving the
    /// kind from the native code.
    pub(crate) fn classify(path: &Path, source: io::Error) -> Error {
        Error::new(ErrorKind::from_io(source.kind()), path, source)
    }

    pub(crate) fn invalid_path(path: &Path, message: &'static str) -> Error {
        Error::new(
            ErrorKind::InvalidPath,
            path,
            io::Error::new(io::ErrorKind::InvalidInput, message),
        )
    }

    /// The "parent is missing but there is no parent" case: recursion reached
    /// the filesystem root and the root itself could not be created. A sane
    /// filesystem only gets here when the root is inaccessible, so this is
    /// shaped like the permission error a native recursive mkdir would raise.
    pub(crate) fn root_unreachable(path: &Path) -> Error {
        Error::new(
            ErrorKind::PermissionDenied,
            path,
            io::Error::new(
                io::ErrorKind::PermissionDenied,
                "cannot create the filesystem root",
            ),
        )
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The path the failing operation was applied to.
    ///
    /// This is the resolved target path or one of its ancestors, except for
    /// pre-resolution failures (invalid characters, empty input) where it is
    /// the path as given.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the error, returning the underlying [`io::Error`].
    pub fn into_io(self) -> io::Error {
        self.source
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        io::Error::new(err.source.kind(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_from_native_codes() {
        let cases = [
            (io::ErrorKind::AlreadyExists, ErrorKind::AlreadyExistsAsFile),
            (io::ErrorKind::NotADirectory, ErrorKind::NotADirectory),
            (io::ErrorKind::PermissionDenied, ErrorKind::PermissionDenied),
            (io::ErrorKind::InvalidInput, ErrorKind::InvalidPath),
            (io::ErrorKind::NotFound, ErrorKind::NotFound),
            (io::ErrorKind::Interrupted, ErrorKind::Other),
        ];

        for (io_kind, kind) in cases {
            let err = Error::classify(Path::new("/x"), io::Error::from(io_kind));
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn conversion_to_io_error_keeps_the_native_code() {
        let err = Error::classify(
            Path::new("/x"),
            io::Error::from(io::ErrorKind::AlreadyExists),
        );
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn display_names_the_path() {
        let err = Error::classify(
            Path::new("/some/dir"),
            io::Error::from(io::ErrorKind::AlreadyExists),
        );
        assert!(err.to_string().contains("/some/dir"));
    }
}
