//! Settings file discovery.
//!
//! The settings file holds secrets (bot tokens), so a deployment-external
//! location takes precedence over the in-repository fallback: a destructive
//! repository operation must never take the secrets with it.

use herald_error::{SecretsError, SecretsErrorKind};
use std::fs::File;
use std::path::{Path, PathBuf};

/// File name of the process settings file.
pub const SETTINGS_FILE: &str = "herald.toml";

/// The default candidate locations, in priority order:
///
/// 1. XDG-style user config directory (`~/.config/herald/herald.toml`)
/// 2. User-home fallback (`~/herald-config/herald.toml`)
/// 3. In-repository path (`settings/herald.toml`)
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("herald").join(SETTINGS_FILE));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join("herald-config").join(SETTINGS_FILE));
    }
    candidates.push(Path::new("settings").join(SETTINGS_FILE));
    candidates
}

/// Resolve the authoritative settings path from `candidates`.
///
/// Tries each candidate in the given priority order and returns the first
/// that exists and is readable. A pure function of the filesystem state at
/// call time; call frequency is at most once per process start, so there is
/// no caching.
///
/// # Errors
///
/// Returns `NoConfigFound` (fatal at startup) when no candidate is usable,
/// listing every path that was tried.
pub fn resolve_secrets_path(candidates: &[PathBuf]) -> Result<PathBuf, SecretsError> {
    for candidate in candidates {
        if File::open(candidate).is_ok() {
            return Ok(candidate.clone());
        }
    }
    let tried = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(SecretsError::new(SecretsErrorKind::NoConfigFound(tried)))
}
