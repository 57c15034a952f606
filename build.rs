//! Embeds the commit hash and build date so `finquest version` can report them.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    // CI sets FINQUEST_COMMIT; local builds ask git
    let commit = env::var("FINQUEST_COMMIT").unwrap_or_else(|_| {
        Command::new("git")
            .args(["rev-parse", "--short=7", "HEAD"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    });

    let date = env::var("FINQUEST_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let out_dir = env::var("OUT_DIR").expect("cargo always sets OUT_DIR for build scripts");
    let dest = Path::new(&out_dir).join("build_info.rs");

    fs::write(
        &dest,
        format!(
            "pub const BUILD_COMMIT: &str = {commit:?};\npub const BUILD_DATE: &str = {date:?};\n"
        ),
    )
    .expect("failed to write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=FINQUEST_COMMIT");
    println!("cargo:rerun-if-env-changed=FINQUEST_BUILD_DATE");
}
