//! Fallback resource resolution for dynamically loaded components.
//!
//! Components refer to auxiliary files (icons, help text) by bare name.
//! Three tiers are tried in order; callers never learn which one answered:
//! 1. the built-in asset root packaged with the host
//! 2. an external-resource delegate, itself a dynamically instantiated
//!    component that knows the user extension folders
//! 3. the bundle archive, an anchor guaranteed to exist in a packaged
//!    install

use crate::loader::Loader;
use cellarium_api::{CanonicalId, ResourceDelegate};
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;
use zip::ZipArchive;

/// Identifier the default external-resource delegate is registered under.
pub const DELEGATE_ID: &str = "resources.UserFolders";

/// Entry prefix for auxiliary files inside the bundle archive.
const BUNDLE_ASSET_PREFIX: &str = "assets/";

pub(crate) fn resolve(
    loader: &Loader,
    asset_root: &Path,
    bundle: Option<&Path>,
    name: &str,
) -> Option<Url> {
    if name.is_empty() {
        return None;
    }

    // Tier 1: assets packaged with the host.
    let packaged = asset_root.join(name);
    if packaged.is_file() {
        if let Ok(url) = Url::from_file_path(&packaged) {
            return Some(url);
        }
    }

    // Tier 2: the external-resource delegate.
    if let Some(delegate) = loader.instantiate_delegate(&CanonicalId::from(DELEGATE_ID)) {
        if let Some(path) = delegate.locate(name) {
            if let Ok(url) = Url::from_file_path(&path) {
                return Some(url);
            }
        }
    }

    // Tier 3: the bundle archive anchor.
    if let Some(bundle) = bundle {
        let entry = format!("{BUNDLE_ASSET_PREFIX}{name}");
        if bundle_contains(bundle, &entry) {
            return Url::parse(&format!("zip:{}!/{}", bundle.display(), entry)).ok();
        }
    }

    None
}

fn bundle_contains(bundle: &Path, entry: &str) -> bool {
    let Ok(file) = File::open(bundle) else {
        return false;
    };
    let Ok(archive) = ZipArchive::new(file) else {
        return false;
    };
    archive.file_names().any(|name| name == entry)
}

/// Default tier-2 delegate: searches the `resources` folder under the user
/// extension root.
pub struct UserFolderDelegate {
    root: PathBuf,
}

impl UserFolderDelegate {
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            root: home.join(".cellarium/extensions/resources"),
        }
    }

    /// Create with a custom resource root (for testing).
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }
}

impl Default for UserFolderDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceDelegate for UserFolderDelegate {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let candidate = self.root.join(name);
        candidate.is_file().then_some(candidate)
    }
}
