//! Persistent on-disk cache of bundle artifacts.
//!
//! Each entry is a directory `<root>/<key>/` holding the cached artifact and a
//! [`CHECKSUM_FILE`] written last. An entry without the checksum file is
//! incomplete and ignored by [`CodeCache::lookup`].

use crate::{BundleError, BundleResult};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File recording the checksum of a cache entry's artifact.
pub const CHECKSUM_FILE: &str = ".checksum";

const PROBE_FILE: &str = ".write_probe";

/// Key identifying a cache entry, derived from bundle identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a bundle: `<symbolic_name>_<version>`.
    #[must_use]
    pub fn new(symbolic_name: &str, version: &str) -> Self {
        Self(sanitize(&format!("{symbolic_name}_{version}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

/// On-disk artifact cache keyed by bundle identity.
#[derive(Debug)]
pub struct CodeCache {
    root: PathBuf,
}

impl CodeCache {
    /// Open (and create) a cache rooted at `root`.
    ///
    /// Fails when the directory cannot be created or written to.
    pub fn open<P: AsRef<Path>>(root: P) -> BundleResult<Self> {
        let root = root.as_ref().to_path_buf();
        ensure_writable(&root).map_err(|e| BundleError::CacheUnavailable {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { root })
    }

    /// Open the configured root, falling back to `default` when it is missing or unusable.
    ///
    /// Never fails: if even the default cannot be prepared, the cache is still
    /// constructed and individual operations report their I/O errors.
    pub fn open_or_default(configured: Option<PathBuf>, default: PathBuf) -> Self {
        if let Some(path) = configured {
            match Self::open(&path) {
                Ok(cache) => return cache,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        fallback = %default.display(),
                        error = %e,
                        "configured plugin cache is unusable, using default"
                    );
                }
            }
        }

        match Self::open(&default) {
            Ok(cache) => cache,
            Err(e) => {
                tracing::warn!(path = %default.display(), error = %e, "default plugin cache is unusable");
                Self { root: default }
            }
        }
    }

    /// Cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_dir(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    /// Path of a complete cache entry, if present.
    #[must_use]
    pub fn lookup(&self, key: &CacheKey) -> Option<PathBuf> {
        let dir = self.entry_dir(key);
        dir.join(CHECKSUM_FILE).is_file().then_some(dir)
    }

    /// Recorded checksum of an entry (`sha256:<hex>`).
    #[must_use]
    pub fn checksum(&self, key: &CacheKey) -> Option<String> {
        let dir = self.lookup(key)?;
        fs::read_to_string(dir.join(CHECKSUM_FILE))
            .ok()
            .map(|s| s.trim().to_string())
    }

    /// Store an artifact under `key` and return the entry directory.
    ///
    /// Replaces any previous entry for the same key.
    pub fn store(&self, key: &CacheKey, file_name: &str, contents: &[u8]) -> BundleResult<PathBuf> {
        let file_name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| BundleError::InvalidManifest(format!("invalid artifact name: {file_name}")))?;

        let dir = self.entry_dir(key);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;

        fs::write(dir.join(file_name), contents)?;
        fs::write(
            dir.join(CHECKSUM_FILE),
            format!("sha256:{}", compute_sha256(contents)),
        )?;

        tracing::debug!(key = %key, entry = %dir.display(), "code cache entry stored");
        Ok(dir)
    }

    /// Copy a file into the cache under `key`.
    pub fn store_file(&self, key: &CacheKey, source: &Path) -> BundleResult<PathBuf> {
        let contents = fs::read(source)?;
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| BundleError::MissingFile(source.display().to_string()))?;
        self.store(key, file_name, &contents)
    }

    /// Remove one entry. Returns whether something was removed.
    pub fn remove(&self, key: &CacheKey) -> BundleResult<bool> {
        let dir = self.entry_dir(key);
        if !dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(dir)?;
        Ok(true)
    }

    /// Keys of all complete entries, sorted.
    #[must_use]
    pub fn entries(&self) -> Vec<CacheKey> {
        let Ok(read_dir) = fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut keys: Vec<CacheKey> = read_dir
            .filter_map(Result::ok)
            .filter(|entry| entry.path().join(CHECKSUM_FILE).is_file())
            .filter_map(|entry| entry.file_name().to_str().map(|s| CacheKey(s.to_string())))
            .collect();
        keys.sort();
        keys
    }

    /// Remove every entry unconditionally. Returns the number of entries removed.
    pub fn clear(&self) -> BundleResult<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
            removed += 1;
        }

        tracing::info!(root = %self.root.display(), removed, "code cache cleared");
        Ok(removed)
    }
}

fn ensure_writable(root: &Path) -> std::io::Result<()> {
    fs::create_dir_all(root)?;
    let probe = root.join(PROBE_FILE);
    fs::write(&probe, b"")?;
    fs::remove_file(&probe)
}

/// Compute SHA256 hash of data, hex encoded.
#[must_use]
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Verify SHA256 checksum of data.
#[must_use]
pub fn verify_sha256(data: &[u8], expected: &str) -> bool {
    let actual = compute_sha256(data);

    // Handle both "sha256:xxx" and raw "xxx" formats
    let expected_hex = expected.strip_prefix("sha256:").unwrap_or(expected);

    actual == expected_hex
}
