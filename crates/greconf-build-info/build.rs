use std::{
    env,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use vergen_gix::{Emitter, GixBuilder};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    emit_build_id();

    // Allow CI or packagers to provide a SHA without any git probing.
    println!("cargo:rerun-if-env-changed=GRECONF_BUILD_SHA_SHORT");

    if let Some(override_sha) = env::var("GRECONF_BUILD_SHA_SHORT")
        .ok()
        .and_then(|s| normalize_sha_short(&s))
    {
        emit_vergen_fallbacks(Some(&override_sha));
        return;
    }

    // Best-effort git probing via vergen-gix, but NEVER fail the build.
    let Some(repo_root) = find_repo_root(Path::new(
        &env::var("CARGO_MANIFEST_DIR").unwrap_or_default(),
    )) else {
        emit_vergen_fallbacks(None);
        return;
    };

    let git = match GixBuilder::default()
        .repo_path(Some(repo_root))
        .sha(true) // short SHA
        .dirty(false)
        .build()
    {
        Ok(git) => git,
        Err(err) => {
            println!("cargo:warning=greconf-build-info: vergen-gix config failed: {err}");
            emit_vergen_fallbacks(None);
            return;
        }
    };

    if let Err(err) = Emitter::default()
        .add_instructions(&git)
        .and_then(|e| e.emit())
    {
        println!("cargo:warning=greconf-build-info: vergen-gix emit failed: {err}");
        emit_vergen_fallbacks(None);
    }
}

/// Emits `GRECONF_BUILD_ID`, the stamp used to name registry config files.
///
/// Resolution order:
/// 1. `GRE_BUILD_ID` (packagers pin the identifier of a release)
/// 2. `SOURCE_DATE_EPOCH` (reproducible builds)
/// 3. Current UTC time
fn emit_build_id() {
    println!("cargo:rerun-if-env-changed=GRE_BUILD_ID");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    if let Ok(raw) = env::var("GRE_BUILD_ID") {
        if let Some(id) = normalize_build_id(&raw) {
            println!("cargo:rustc-env=GRECONF_BUILD_ID={id}");
            return;
        }
        println!("cargo:warning=greconf-build-info: ignoring unusable GRE_BUILD_ID {raw:?}");
    }

    let stamp = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    println!(
        "cargo:rustc-env=GRECONF_BUILD_ID={}",
        stamp.format("%Y%m%d%H%M%S")
    );
}

/// A build identifier ends up as a file name, so only a conservative
/// character set is accepted.
fn normalize_build_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        return None;
    }

    trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .then(|| trimmed.to_string())
}

fn emit_vergen_fallbacks(sha_short: Option<&str>) {
    // These are the env vars the crate uses via `env!()`.
    // They MUST always be set, or compilation will fail.
    let sha = sha_short.unwrap_or("unknown");
    println!("cargo:rustc-env=VERGEN_GIT_SHA={sha}");
    println!("cargo:rustc-env=VERGEN_GIT_DIRTY=false");
}

fn normalize_sha_short(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.len() >= 7 {
        &trimmed[..7]
    } else {
        trimmed
    };

    if candidate.len() == 7 && candidate.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(candidate.to_string())
    } else {
        None
    }
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}
