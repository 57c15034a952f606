//! Commit and date captured by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `finquest version`.
pub fn version_line() -> String {
    format!(
        "finquest {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
