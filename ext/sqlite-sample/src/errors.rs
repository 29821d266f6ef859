///
/// Extension error types.
///
/// Every failure during a load attempt is terminal and surfaces as one of
/// these variants. `ExtensionError::status()` converts it into the SQLite
/// result code returned from the entry point.
///

use std::os::raw::c_int;

use rusqlite::ffi;
use thiserror::Error;

use crate::api::ApiVersion;

/// A rejection reported by the host's function catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (code {code})")]
pub struct HostError {
    pub code: c_int,
    pub message: String,
}

impl HostError {
    pub fn new(code: c_int, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for HostError {
    fn from(err: rusqlite::Error) -> Self {
        let code = match &err {
            rusqlite::Error::SqliteFailure(failure, _) => failure.extended_code,
            _ => ffi::SQLITE_ERROR,
        };
        Self::new(code, err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("SQLite host handle or API routines missing")]
    MissingApi,

    #[error("Failed to bind SQLite API routines: {0}")]
    ApiBinding(HostError),

    #[error("SQLite {found} is older than the required {required}")]
    IncompatibleApi {
        required: ApiVersion,
        found: ApiVersion,
    },

    #[error("Failed to register {name}/{arity}: {source}")]
    Registration {
        name: &'static str,
        arity: i32,
        source: HostError,
    },

    #[error("Failed to remove {name}/{arity} during rollback: {source} (load failed: {cause})")]
    Rollback {
        name: &'static str,
        arity: i32,
        source: HostError,
        cause: Box<ExtensionError>,
    },
}

impl ExtensionError {
    /// SQLite result code reported to the host for this failure.
    pub fn status(&self) -> c_int {
        match self {
            Self::MissingApi | Self::IncompatibleApi { .. } => ffi::SQLITE_ERROR,
            Self::ApiBinding(source) => source.code,
            Self::Registration { source, .. } => source.code,
            Self::Rollback { cause, .. } => cause.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = ExtensionError::IncompatibleApi {
            required: ApiVersion::new(3, 8, 3),
            found: ApiVersion::new(3, 7, 17),
        };
        assert!(err.to_string().contains("3.7.17"));
        assert!(err.to_string().contains("3.8.3"));

        let err = ExtensionError::Registration {
            name: "sample",
            arity: 0,
            source: HostError::new(ffi::SQLITE_BUSY, "function in use"),
        };
        assert!(err.to_string().contains("sample/0"));
        assert!(err.to_string().contains("function in use"));

        let err = ExtensionError::MissingApi;
        assert!(err.to_string().contains("missing"));

        let err = ExtensionError::ApiBinding(HostError::new(ffi::SQLITE_MISUSE, "api already bound"));
        assert!(err.to_string().contains("api already bound"));

        let err = ExtensionError::Rollback {
            name: "sample",
            arity: 0,
            source: HostError::new(ffi::SQLITE_BUSY, "statement active"),
            cause: Box::new(ExtensionError::MissingApi),
        };
        assert!(err.to_string().contains("sample/0"));
        assert!(err.to_string().contains("during rollback"));
        assert!(err.to_string().contains("statement active"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ExtensionError::MissingApi.status(), ffi::SQLITE_ERROR);

        let err = ExtensionError::IncompatibleApi {
            required: ApiVersion::new(3, 8, 3),
            found: ApiVersion::new(3, 0, 0),
        };
        assert_eq!(err.status(), ffi::SQLITE_ERROR);

        let err = ExtensionError::Registration {
            name: "sample_version",
            arity: 0,
            source: HostError::new(ffi::SQLITE_MISUSE, "bad flags"),
        };
        assert_eq!(err.status(), ffi::SQLITE_MISUSE);

        let err = ExtensionError::ApiBinding(HostError::new(ffi::SQLITE_NOMEM, "out of memory"));
        assert_eq!(err.status(), ffi::SQLITE_NOMEM);
    }

    #[test]
    fn test_rollback_status_is_the_registration_status() {
        let registration = ExtensionError::Registration {
            name: "sample_version",
            arity: 0,
            source: HostError::new(ffi::SQLITE_MISUSE, "duplicate"),
        };
        let err = ExtensionError::Rollback {
            name: "sample",
            arity: 0,
            source: HostError::new(ffi::SQLITE_BUSY, "statement active"),
            cause: Box::new(registration),
        };
        assert_eq!(err.status(), ffi::SQLITE_MISUSE);
    }

    #[test]
    fn test_host_error_from_sqlite_failure() {
        let err = rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_BUSY),
            Some("unable to delete/modify user-function due to active statements".into()),
        );
        let host = HostError::from(err);
        assert_eq!(host.code, ffi::SQLITE_BUSY);
        assert!(host.message.contains("active statements"));

        let host = HostError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(host.code, ffi::SQLITE_ERROR);
    }
}
