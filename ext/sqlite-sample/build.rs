///
/// Build script for sqlite-sample.
///
/// Stamps the build metadata read by `src/version.rs`:
/// - SQLITE_SAMPLE_DATE: local build time with UTC offset, unless pinned
/// - SQLITE_SAMPLE_SOURCE: source reference (commit, tag), empty by default
///

use chrono::Local;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ%z";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SQLITE_SAMPLE_DATE");
    println!("cargo:rerun-if-env-changed=SQLITE_SAMPLE_SOURCE");

    let date = std::env::var("SQLITE_SAMPLE_DATE")
        .unwrap_or_else(|_| Local::now().format(DATE_FORMAT).to_string());
    let source = std::env::var("SQLITE_SAMPLE_SOURCE").unwrap_or_default();

    println!("cargo:rustc-env=SQLITE_SAMPLE_DATE={date}");
    println!("cargo:rustc-env=SQLITE_SAMPLE_SOURCE={source}");
}
