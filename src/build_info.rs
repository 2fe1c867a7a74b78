//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Line printed by `--version`, e.g. `skirmish 0.1.0 (2026-10-18, 1a2b3c4)`.
/// Non-release builds are tagged with their profile.
pub fn version_line(program: &str) -> String {
    let mut line = format!(
        "{} {} ({}, {})",
        program,
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    );
    if BUILD_PROFILE != "release" {
        line.push_str(&format!(" [{BUILD_PROFILE}]"));
    }
    line
}
