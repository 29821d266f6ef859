///
/// # API Surface Binding
///
/// A host hands the extension its versioned API surface at load time. Before
/// any registration routine is touched, the surface is bound: its version is
/// compared against `REQUIRED_API_VERSION` and, when compatible, the host is
/// wrapped in a `BoundApi` scoped to the current `initialize` call.
///
/// The binding lives on the caller's stack. Nothing is kept in statics, so
/// several connections (or several hosts in one process) can load the
/// extension independently.
///
/// ## Versions
///
/// Versions use SQLite's packed number encoding, `X*1000000 + Y*1000 + Z`,
/// the same value `sqlite3_libversion_number()` returns.
///

use std::fmt;

use crate::errors::{ExtensionError, HostError};
use crate::function::FunctionDescriptor;
use crate::host::FunctionHost;

/// First SQLite release accepting `SQLITE_DETERMINISTIC`.
pub const REQUIRED_API_VERSION: ApiVersion = ApiVersion::new(3, 8, 3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion(i32);

impl ApiVersion {
    pub const fn new(major: i32, minor: i32, patch: i32) -> Self {
        Self(major * 1_000_000 + minor * 1_000 + patch)
    }

    pub const fn from_number(number: i32) -> Self {
        Self(number)
    }

    pub const fn number(self) -> i32 {
        self.0
    }

    pub const fn major(self) -> i32 {
        self.0 / 1_000_000
    }

    pub const fn minor(self) -> i32 {
        (self.0 / 1_000) % 1_000
    }

    pub const fn patch(self) -> i32 {
        self.0 % 1_000
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())
    }
}

/// The host's API surface as seen by the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSurface {
    version: ApiVersion,
}

impl ApiSurface {
    pub const fn new(version: ApiVersion) -> Self {
        Self { version }
    }

    /// Surface of the SQLite library the crate is linked against.
    ///
    /// With the `loadable_extension` feature every call is routed through the
    /// host's routine table, so this reports the host's own version.
    pub fn linked() -> Self {
        Self::new(ApiVersion::from_number(rusqlite::version_number()))
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn is_compatible(&self, required: ApiVersion) -> bool {
        self.version >= required
    }

    /// Validate the surface and bind the host's registration routines.
    pub fn bind<'h, H>(
        &self,
        host: &'h mut H,
        required: ApiVersion,
    ) -> Result<BoundApi<'h, H>, ExtensionError>
    where
        H: FunctionHost + ?Sized,
    {
        if !self.is_compatible(required) {
            return Err(ExtensionError::IncompatibleApi {
                required,
                found: self.version,
            });
        }

        Ok(BoundApi {
            host,
            version: self.version,
        })
    }
}

/// Registration routines bound from a compatible surface.
///
/// Only obtainable through `ApiSurface::bind`, so no registration can happen
/// before the version check.
pub struct BoundApi<'h, H: FunctionHost + ?Sized> {
    host: &'h mut H,
    version: ApiVersion,
}

impl<H: FunctionHost + ?Sized> BoundApi<'_, H> {
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn register(&mut self, descriptor: &FunctionDescriptor) -> Result<(), HostError> {
        self.host.register_function(descriptor)
    }

    pub fn unregister(&mut self, descriptor: &FunctionDescriptor) -> Result<(), HostError> {
        self.host
            .unregister_function(descriptor.name, descriptor.arity)
    }
}
