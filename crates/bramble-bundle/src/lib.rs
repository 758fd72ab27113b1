//! Bundle discovery, loading and dependency resolution for bramble
//!
//! A bundle is a directory holding a `manifest.json` and, optionally, a
//! library artifact that gets copied into the [`CodeCache`].
//!
//! # Bundle Structure
//!
//! ```text
//! plugins/
//! ├── org.example.core/
//! │   └── manifest.json
//! └── org.example.viewer/
//!     ├── manifest.json
//!     └── lib/
//!         └── liborg_example_viewer.so
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bramble_bundle::{BundleLoader, CodeCache, discover_bundle_paths};
//! use std::sync::Arc;
//!
//! let cache = Arc::new(CodeCache::open("/tmp/plugin_cache")?);
//! let mut loader = BundleLoader::new(cache);
//!
//! let paths = discover_bundle_paths("/opt/app/plugins;/opt/app/extra");
//! let report = loader.load_bundles(&paths);
//! let resolution = loader.resolve_all_bundles();
//! println!("{} loaded, {} unresolved", report.loaded.len(), resolution.unresolved.len());
//! # Ok::<(), bramble_bundle::BundleError>(())
//! ```

mod bundle;
mod code_cache;
mod discovery;
mod error;
mod extension;
mod manifest;
mod system;

pub mod loader;

pub use bundle::{Bundle, BundleId, BundleSnapshot};
pub use code_cache::{CHECKSUM_FILE, CacheKey, CodeCache, compute_sha256, verify_sha256};
pub use discovery::{discover_bundle_paths, discover_in_dirs};
pub use error::BundleError;
pub use extension::{
    EXTENSION_POINT_SERVICE_ID, Extension, ExtensionPoint, ExtensionPointService,
    ExtensionRegistry,
};
pub use loader::{BundleLoader, LoadReport, ResolutionReport, UnresolvedBundle, UnresolvedReason};
pub use manifest::{
    ActivationPolicy, BundleInfo, BundleManifest, ExtensionInfo, ExtensionPointInfo, LibraryInfo,
};
pub use system::{SYSTEM_BUNDLE_NAME, SystemBundle};

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Current manifest format version.
pub const MANIFEST_VERSION: &str = "1.0";

/// Manifest file name within a bundle directory.
pub const MANIFEST_FILE: &str = "manifest.json";
