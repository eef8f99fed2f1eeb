//! Build/version metadata shared by the greconf library and CLI.
//!
//! The build identifier is the primary key of every registry config file a
//! build writes, so it is fixed at compile time by the build script.

/// Identifier stamped on this build, e.g. `20230101120000`.
pub const BUILD_ID: &str = env!("GRECONF_BUILD_ID");

/// The `SemVer` version of the build (from Cargo).
pub const SEMVER: &str = env!("CARGO_PKG_VERSION");

/// The git SHA emitted by the build script.
///
/// This is expected to be a 7-character hex string when available; otherwise it
/// is set to `"unknown"`.
pub const GIT_SHA_SHORT: &str = env!("VERGEN_GIT_SHA");

/// Whether the build script reported the repo as dirty.
pub const GIT_DIRTY: bool = str_eq(env!("VERGEN_GIT_DIRTY"), "true");

/// True if the git SHA looks like a short hex hash.
pub const HAS_GIT_SHA: bool = is_short_hex(GIT_SHA_SHORT);

const LONG_VERSION_WITH_SHA: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", build ",
    env!("GRECONF_BUILD_ID"),
    ")"
);

const LONG_VERSION_WITHOUT_SHA: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (build ",
    env!("GRECONF_BUILD_ID"),
    ")"
);

/// The version string used by CLI `--version` output.
///
/// Examples:
/// - `0.1.0 (a1b2c3d, build 20230101120000)`
/// - `0.1.0 (build 20230101120000)` (when git data is unavailable)
pub const LONG_VERSION: &str = if HAS_GIT_SHA {
    LONG_VERSION_WITH_SHA
} else {
    LONG_VERSION_WITHOUT_SHA
};

const fn is_short_hex(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 7 {
        return false;
    }

    let mut i = 0;
    while i < 7 {
        let c = bytes[i];
        let is_digit = c >= b'0' && c <= b'9';
        let is_lower = c >= b'a' && c <= b'f';
        let is_upper = c >= b'A' && c <= b'F';
        if !(is_digit || is_lower || is_upper) {
            return false;
        }
        i += 1;
    }
    true
}

const fn str_eq(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    if a_bytes.len() != b_bytes.len() {
        return false;
    }

    let mut i = 0;
    while i < a_bytes.len() {
        if a_bytes[i] != b_bytes[i] {
            return false;
        }
        i += 1;
    }

    true
}
