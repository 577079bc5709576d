//! Candidate discovery for extension folders and the packaged bundle.
//!
//! The scan pipeline is the same for every source:
//! 1. enumerate candidate identifiers (folder children, bundle entries, or
//!    already-registered built-ins)
//! 2. adapt any dynamic-library unit into the loader's factory tables
//! 3. probe each identifier against the requested kind
//!
//! Probe misses are the expected, high-frequency path and are discarded
//! without a trace. Only structural problems (unreadable folder, unopenable
//! bundle) surface, once, through the diagnostic latches.

use crate::diagnostics::DiagnosticLatches;
use crate::library::{self, UnitStore};
use crate::loader::Loader;
use cellarium_api::{CanonicalId, ComponentDescriptor, ComponentKind, ProbeOutcome};
use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use zip::ZipArchive;

/// Entry suffix for built-in units listed in the packaged bundle.
pub const BUNDLE_UNIT_SUFFIX: &str = ".unit";

/// Summary of one scan pass, for the log.
#[derive(Debug, Default, Clone)]
pub struct ScanSummary {
    pub examined: usize,
    pub admitted: usize,
}

pub struct Scanner<'a> {
    loader: &'a Loader,
    latches: &'a DiagnosticLatches,
    units: &'a UnitStore,
    bundle: Option<PathBuf>,
}

impl<'a> Scanner<'a> {
    pub fn new(
        loader: &'a Loader,
        latches: &'a DiagnosticLatches,
        units: &'a UnitStore,
        bundle: Option<PathBuf>,
    ) -> Self {
        Self {
            loader,
            latches,
            units,
            bundle,
        }
    }

    /// Scan `folder` for units of `kind`, qualifying identifiers with
    /// `namespace`. Falls back to the packaged bundle when `folder` is not a
    /// real directory. Never fails: structural problems emit one developer
    /// diagnostic and yield an empty list.
    pub fn scan(&self, folder: &Path, namespace: &str, kind: ComponentKind) -> Vec<ComponentDescriptor> {
        if namespace.is_empty() || folder.as_os_str().is_empty() {
            self.latches.warn_once("scan-unconfigured", || {
                debug!("scan invoked without a folder or namespace; nothing to discover");
            });
            return Vec::new();
        }

        let start = Instant::now();
        let mut summary = ScanSummary::default();
        let found = if folder.is_dir() {
            self.scan_directory(folder, namespace, kind, &mut summary)
        } else {
            self.scan_bundle(namespace, kind, &mut summary)
        };
        info!(
            "scanned {} for {}s: {} candidates, {} admitted in {:?}",
            namespace,
            kind.label(),
            summary.examined,
            summary.admitted,
            start.elapsed()
        );
        found
    }

    /// Probe every identifier already registered under `namespace`. Built-in
    /// components enter the tables at bootstrap, so this is the discovery
    /// pass for the application's own package.
    pub fn scan_registered(&self, namespace: &str, kind: ComponentKind) -> Vec<ComponentDescriptor> {
        let mut found = Vec::new();
        for id in self.loader.ids_in_namespace(kind, namespace) {
            if let Some(descriptor) = self.probe_candidate(kind, id, namespace) {
                found.push(descriptor);
            }
        }
        found
    }

    fn scan_directory(
        &self,
        folder: &Path,
        namespace: &str,
        kind: ComponentKind,
        summary: &mut ScanSummary,
    ) -> Vec<ComponentDescriptor> {
        let entries = match std::fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(e) => {
                self.latches.warn_once(format!("scan-folder:{}", folder.display()), || {
                    debug!("extension folder {} is unreadable: {e}", folder.display());
                });
                return Vec::new();
            }
        };

        let mut found = Vec::new();
        // Direct children only; nested folders belong to other namespaces.
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || !library::is_dynamic_unit(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };
            summary.examined += 1;
            let id = CanonicalId::new(namespace, stem);
            self.adapt_unit(&path, stem, namespace, &id);
            if let Some(descriptor) = self.probe_candidate(kind, id, namespace) {
                summary.admitted += 1;
                found.push(descriptor);
            }
        }
        found
    }

    /// Load the unit at `path` and register its declarations under
    /// `namespace`. Structural failures are recorded against the candidate
    /// identifier so the subsequent probe reports them.
    fn adapt_unit(&self, path: &Path, stem: &str, namespace: &str, id: &CanonicalId) {
        if self.loader.contains_any(id) {
            return;
        }
        match library::open_unit(path) {
            Ok(unit) => {
                if let Err(violation) = library::check_name(&unit, stem) {
                    self.loader.register_malformed(id.clone(), violation.to_string());
                    return;
                }
                for decl in &unit.manifest.decls {
                    self.loader.register_decl(
                        CanonicalId::new(namespace, &decl.base_name),
                        decl.kind,
                        decl.factory,
                    );
                }
                self.units.keep(unit);
            }
            Err(violation) => {
                self.loader.register_malformed(id.clone(), violation.to_string());
            }
        }
    }

    /// Archive fallback for packaged installs: enumerate bundle entries that
    /// are direct children of the namespace's path form.
    fn scan_bundle(
        &self,
        namespace: &str,
        kind: ComponentKind,
        summary: &mut ScanSummary,
    ) -> Vec<ComponentDescriptor> {
        let Some(bundle) = &self.bundle else {
            self.latches.warn_once("bundle-unconfigured", || {
                debug!("no extension folder and no bundle archive configured");
            });
            return Vec::new();
        };

        let archive = File::open(bundle).map_err(|e| e.to_string()).and_then(|f| {
            ZipArchive::new(f).map_err(|e| e.to_string())
        });
        let archive = match archive {
            Ok(archive) => archive,
            Err(e) => {
                self.latches.warn_once(format!("bundle-unreadable:{}", bundle.display()), || {
                    debug!("bundle archive {} could not be opened: {e}", bundle.display());
                });
                return Vec::new();
            }
        };

        let prefix = format!("{}/", namespace.replace('.', "/"));
        let mut candidates: Vec<CanonicalId> = archive
            .file_names()
            .filter(|name| name.starts_with(&prefix))
            .filter(|name| !name[prefix.len()..].contains('/'))
            .filter(|name| name.ends_with(BUNDLE_UNIT_SUFFIX))
            .map(|name| {
                let stem = &name[prefix.len()..name.len() - BUNDLE_UNIT_SUFFIX.len()];
                CanonicalId::new(namespace, stem)
            })
            .collect();
        candidates.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        let mut found = Vec::new();
        for id in candidates {
            summary.examined += 1;
            if let Some(descriptor) = self.probe_candidate(kind, id, namespace) {
                summary.admitted += 1;
                found.push(descriptor);
            }
        }
        found
    }

    /// A probe success with a non-empty display name admits the candidate;
    /// every other outcome discards it silently. The loader owns the
    /// one-shot diagnostics for the failure arms.
    fn probe_candidate(
        &self,
        kind: ComponentKind,
        id: CanonicalId,
        namespace: &str,
    ) -> Option<ComponentDescriptor> {
        match self.loader.probe(kind, &id) {
            ProbeOutcome::Compatible { display_name } if !display_name.is_empty() => {
                Some(ComponentDescriptor::new(display_name, id, namespace))
            }
            _ => None,
        }
    }
}
