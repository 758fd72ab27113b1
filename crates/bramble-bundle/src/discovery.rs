//! Discovery of candidate bundle directories.

use std::fs;
use std::path::{Path, PathBuf};

/// Discover candidate bundle paths from a semicolon-delimited list of base directories.
///
/// Every immediate subdirectory of every base directory is one candidate.
/// Missing base directories and non-directories are skipped with a warning.
/// The order follows directory listing order and is not deterministic.
pub fn discover_bundle_paths(plugin_dirs: &str) -> Vec<PathBuf> {
    let bases: Vec<&str> = plugin_dirs
        .split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    discover_in_dirs(bases)
}

/// Discover candidate bundle paths below each of the given base directories.
pub fn discover_in_dirs<I, P>(base_dirs: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut candidates = Vec::new();
    for base in base_dirs {
        let base = base.as_ref();
        tracing::info!(dir = %base.display(), "plugin base directory");

        if !base.is_dir() {
            tracing::warn!(
                dir = %base.display(),
                "plugin base directory is not a directory or does not exist, skipped"
            );
            continue;
        }

        match fs::read_dir(base) {
            Ok(entries) => {
                candidates.extend(
                    entries
                        .filter_map(Result::ok)
                        .map(|entry| entry.path())
                        .filter(|path| path.is_dir()),
                );
            }
            Err(e) => {
                tracing::warn!(dir = %base.display(), error = %e, "cannot list plugin base directory, skipped");
            }
        }
    }
    candidates
}
