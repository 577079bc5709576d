//! Session context owning the loader, catalogs, and diagnostic latches.
//!
//! A session is the unit of isolation: independent sessions never share
//! factory tables or warning latches. The workbench itself runs on one
//! process-wide default session, constructed lazily under a once guard.

use crate::catalog::Catalog;
use crate::config::{ConfigProvider, FileConfigProvider};
use crate::diagnostics::DiagnosticLatches;
use crate::discovery::Scanner;
use crate::library::UnitStore;
use crate::loader::Loader;
use crate::resources;
use cellarium_api::{ComponentDescriptor, ComponentKind};
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

static GLOBAL_SESSION: Lazy<Session> = Lazy::new(|| {
    Session::new(Box::new(FileConfigProvider::new()), SessionPaths::detect())
});

/// Filesystem anchors for one session.
#[derive(Debug, Clone)]
pub struct SessionPaths {
    /// Directory the application runs from; kind folders live directly
    /// under it in an unpacked install.
    pub install_root: PathBuf,
    /// Packaged assets (tier 1 of resource resolution).
    pub asset_root: PathBuf,
    /// Bundle archive consulted when a kind folder is not a real directory.
    pub bundle: PathBuf,
}

impl SessionPaths {
    /// Anchors derived from the running executable's location.
    pub fn detect() -> Self {
        let install_root = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::rooted_at(install_root)
    }

    /// Anchors under an explicit root (for testing and embedders).
    pub fn rooted_at(install_root: PathBuf) -> Self {
        let asset_root = install_root.join("assets");
        let bundle = install_root.join("cellarium-bundle.zip");
        Self {
            install_root,
            asset_root,
            bundle,
        }
    }
}

pub struct Session {
    latches: Arc<DiagnosticLatches>,
    loader: Loader,
    config: Box<dyn ConfigProvider>,
    paths: SessionPaths,
    units: UnitStore,
    rules: Catalog,
    analyses: Catalog,
    lattices: Catalog,
}

impl Session {
    pub fn new(config: Box<dyn ConfigProvider>, paths: SessionPaths) -> Self {
        let latches = Arc::new(DiagnosticLatches::new());
        Self {
            loader: Loader::new(latches.clone()),
            latches,
            config,
            paths,
            units: UnitStore::new(),
            rules: Catalog::new(ComponentKind::Rule),
            analyses: Catalog::new(ComponentKind::Analysis),
            lattices: Catalog::new(ComponentKind::Lattice),
        }
    }

    /// The process-wide default session.
    pub fn global() -> &'static Session {
        &GLOBAL_SESSION
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn latches(&self) -> &DiagnosticLatches {
        &self.latches
    }

    pub fn paths(&self) -> &SessionPaths {
        &self.paths
    }

    /// Session-reset hook for the simulation controller: re-arms every
    /// one-shot diagnostic.
    pub fn begin_session(&self) {
        self.latches.reset_all();
    }

    /// The display-name catalog for `kind`, lazily built and kept in sync
    /// with the configured secondary folder.
    pub fn catalog(&self, kind: ComponentKind) -> &Catalog {
        let catalog = match kind {
            ComponentKind::Rule => &self.rules,
            ComponentKind::Analysis => &self.analyses,
            ComponentKind::Lattice => &self.lattices,
        };
        let scanner = self.scanner();
        catalog.prime(&scanner, &self.paths.install_root);
        let secondary = match kind {
            ComponentKind::Rule => self.config.secondary_rules(),
            ComponentKind::Analysis => self.config.secondary_analyses(),
            ComponentKind::Lattice => None,
        };
        catalog.sync_secondary(&scanner, secondary);
        catalog
    }

    pub fn rule_catalog(&self) -> &Catalog {
        self.catalog(ComponentKind::Rule)
    }

    pub fn analysis_catalog(&self) -> &Catalog {
        self.catalog(ComponentKind::Analysis)
    }

    pub fn lattice_catalog(&self) -> &Catalog {
        self.catalog(ComponentKind::Lattice)
    }

    /// Run one discovery pass. Blocking file I/O; keep off latency-sensitive
    /// threads.
    pub fn scan(&self, folder: &Path, namespace: &str, kind: ComponentKind) -> Vec<ComponentDescriptor> {
        self.scanner().scan(folder, namespace, kind)
    }

    /// Resolve an auxiliary resource through the fallback chain.
    pub fn resolve_resource(&self, name: &str) -> Option<Url> {
        let bundle = self.paths.bundle.is_file().then_some(self.paths.bundle.as_path());
        resources::resolve(&self.loader, &self.paths.asset_root, bundle, name)
    }

    fn scanner(&self) -> Scanner<'_> {
        let bundle = self.paths.bundle.is_file().then(|| self.paths.bundle.clone());
        Scanner::new(&self.loader, &self.latches, &self.units, bundle)
    }
}
