//!
//! # sqlite-sample
//!
//! A loadable SQLite extension that registers two scalar functions:
//!
//! - `sample()` returns `'yo!'`
//! - `sample_version()` returns the build's version string (`VERSION`)
//!
//! ## Loading
//!
//! Built with `--no-default-features --features loadable_extension`, the
//! `cdylib` exports `sqlite3_sample_init` and loads into any SQLite host:
//!
//! ```sql
//! .load ./libsqlite_sample sqlite3_sample_init
//! SELECT sample(), sample_version();
//! ```
//!
//! ## In-process use
//!
//! With the default `bundled` feature the same registration runs against a
//! `rusqlite::Connection`:
//!
//! ```rust,ignore
//! let mut conn = rusqlite::Connection::open_in_memory()?;
//! sqlite_sample::register(&mut conn)?;
//! ```
//!
//! Any other catalog can receive the functions by implementing
//! `FunctionHost` and calling `initialize` directly.
//!

pub mod api;
pub mod errors;
pub mod function;
pub mod host;
pub mod init;
pub mod registry;
pub mod version;

#[cfg(feature = "loadable_extension")]
pub mod entry;

pub use api::{ApiSurface, ApiVersion, BoundApi, REQUIRED_API_VERSION};
pub use errors::{ExtensionError, HostError};
pub use function::{EvalContext, FunctionDescriptor, ResultValue, ScalarFn, TextLifetime};
pub use host::FunctionHost;
pub use init::{FailurePolicy, LoadOptions, LoadReport, LoadStage, initialize};
pub use registry::FUNCTIONS;
pub use version::{DATE, SOURCE, VERSION};

/// Register every function on `conn`, checked against the linked SQLite.
pub fn register(conn: &mut rusqlite::Connection) -> Result<LoadReport, ExtensionError> {
    initialize(conn, &ApiSurface::linked(), &LoadOptions::default())
}
