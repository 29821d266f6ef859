///
/// Loadable-extension entry point.
///
/// SQLite derives the default entry point from the file name, so the library
/// is either shipped as `sample.<ext>` or loaded with the entry point spelled
/// out (`.load ./libsqlite_sample sqlite3_sample_init`). The host calls it once per
/// load with its database handle, an error-message slot, and its API
/// routine table. The connection built here borrows the handle and never
/// closes it.
///
/// The error-message slot is left untouched, so SQLite reports its generic
/// load failure text alongside the returned status.
///
/// `Connection::extension_init2` stores the host's routine table in
/// rusqlite's process-global slot; every later rusqlite call in this library
/// goes through it. The crate itself keeps no other statics.
///
/// The tests here need the loadable build:
/// `cargo test --no-default-features --features loadable_extension --lib`.
///

use std::os::raw::{c_char, c_int};

use rusqlite::{Connection, ffi};

use crate::api::ApiSurface;
use crate::errors::{ExtensionError, HostError};
use crate::init::{LoadOptions, LoadReport, initialize};

#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlite3_sample_init(
    db: *mut ffi::sqlite3,
    _pz_err_msg: *mut *mut c_char,
    p_api: *mut ffi::sqlite3_api_routines,
) -> c_int {
    match unsafe { load(db, p_api) } {
        Ok(_) => ffi::SQLITE_OK,
        Err(err) => {
            tracing::warn!(status = err.status(), "sqlite-sample failed to load: {err}");
            err.status()
        }
    }
}

unsafe fn load(
    db: *mut ffi::sqlite3,
    p_api: *mut ffi::sqlite3_api_routines,
) -> Result<LoadReport, ExtensionError> {
    if db.is_null() || p_api.is_null() {
        return Err(ExtensionError::MissingApi);
    }

    let mut conn = unsafe { Connection::extension_init2(db, p_api) }
        .map_err(|err| ExtensionError::ApiBinding(HostError::from(err)))?;

    initialize(&mut conn, &ApiSurface::linked(), &LoadOptions::default())
}
