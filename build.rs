//! Embeds the commit, build date and cargo profile into `build_info`.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

const UNKNOWN_COMMIT: &str = "unknown";

/// Short hash of HEAD, or `unknown` outside a git checkout.
fn git_commit() -> String {
    Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| hash.len() == 7)
        .unwrap_or_else(|| UNKNOWN_COMMIT.to_string())
}

fn override_or(var: &str, fallback: impl FnOnce() -> String) -> String {
    println!("cargo:rerun-if-env-changed={var}");
    env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(fallback)
}

fn main() {
    let commit = override_or("SKIRMISH_BUILD_COMMIT", git_commit);
    let date = override_or("SKIRMISH_BUILD_DATE", || {
        chrono::Utc::now().format("%Y-%m-%d").to_string()
    });
    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let generated = format!(
        "pub const BUILD_COMMIT: &str = {commit:?};\n\
         pub const BUILD_DATE: &str = {date:?};\n\
         pub const BUILD_PROFILE: &str = {profile:?};\n"
    );
    fs::write(Path::new(&out_dir).join("build_info.rs"), generated)
        .expect("failed to write build info");

    println!("cargo:rerun-if-changed=.git/HEAD");
}
