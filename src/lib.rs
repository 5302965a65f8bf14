#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! Make a directory and any missing parents, returning the resolved path.
//!
//! The crate provides one operation in two flavors: [`make_dir`] suspends at
//! each filesystem call and runs the work on the Tokio blocking pool, the
//! way `tokio::fs` does; [`make_dir_sync`] blocks the calling thread and
//! needs no runtime. Both resolve their input to an absolute path once,
//! create every missing ancestor, and return the resolved path of the
//! directory that was asked for.
//!
//! An already existing directory is a success, and concurrent calls
//! targeting the same or overlapping paths never fail against each other:
//! each creation attempt that loses a race falls back to inspecting what is
//! actually there. Only a *non*-directory in the way is an error.
//!
//! # Examples
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), make_dir::Error> {
//! let made = make_dir::make_dir("a/b/c/d").await?;
//! println!("created {}", made.display());
//! # Ok(())
//! # }
//! ```
//!
//! Configured creation goes through the [`MakeDir`] builder:
//!
//! ```no_run
//! use make_dir::MakeDir;
//!
//! # fn main() -> Result<(), make_dir::Error> {
//! MakeDir::new().mode(0o700).create_blocking("private/dir")?;
//! # Ok(())
//! # }
//! ```
//!
//! The filesystem itself is pluggable: anything implementing [`DirFs`] can
//! stand in for the host, which is how the tests simulate races and failures
//! deterministically.

mod builder;
mod error;
mod fs;
mod make_dir;
mod path;

pub use self::builder::MakeDir;
pub use self::error::{Error, ErrorKind};
pub use self::fs::{DirFs, OsFs};
pub use self::make_dir::{make_dir, make_dir_sync};
