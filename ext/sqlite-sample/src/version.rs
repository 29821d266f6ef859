//!
//! Build metadata compiled into the extension.
//!
//! `VERSION` is derived from the workspace version and is what
//! `sample_version()` returns. `DATE` and `SOURCE` are stamped by the build
//! script and are only exposed to Rust callers.
//!

/// Semantic version string, `v`-prefixed.
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Build timestamp with UTC offset, e.g. `2024-02-24T22:49:08Z-0800`.
pub const DATE: &str = env!("SQLITE_SAMPLE_DATE");

/// Source reference the build was produced from. May be empty.
pub const SOURCE: &str = env!("SQLITE_SAMPLE_SOURCE");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_prefixed_crate_version() {
        assert_eq!(VERSION, "v0.0.1-alpha.1");
        assert_eq!(&VERSION[1..], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_date_carries_utc_offset() {
        let (_, offset) = DATE.rsplit_once('Z').expect("date should contain 'Z'");
        assert!(offset.starts_with('+') || offset.starts_with('-'));
        assert_eq!(offset.len(), 5);
    }
}
